//! Form module - joint angles, smoothing, rep counting and feedback
//!
//! Re-exports only. All logic in submodules.

mod analyzer;
mod angles;
mod clock;
mod error;
mod exercise;
mod feedback;
mod landmarks;
mod reps;
mod smoothing;
mod stage;
mod summary;

pub use analyzer::{AnalysisResult, AnalysisState, ExerciseAnalyzer};
pub use angles::calculate_angle;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AnalyzerError, Result};
pub use exercise::{AngleAdjustment, AngleSource, ExerciseConfig, ExerciseKind, TORSO_REFERENCE_OFFSET};
pub use feedback::{FeedbackBand, FeedbackGenerator, DEFAULT_THROTTLE_MS};
pub use landmarks::{
    Landmark, LandmarkAdapter, LandmarkSet, PosePoint, RequiredJoints,
    // Constants
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    POSE_LANDMARK_COUNT,
};
pub use reps::RepCounter;
pub use smoothing::{SmoothedAngleTracker, DEFAULT_WARMUP, DEFAULT_WINDOW};
pub use stage::{Stage, StageMachine, Transition};
pub use summary::SessionSummary;
