//! Exercise variants and their configuration
//!
//! Every exercise runs the same pipeline (adapt → angle → smooth →
//! transition → count → feedback). What differs is captured here as data:
//! joints, angle source, adjustment, thresholds, counted transition and
//! feedback bands.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::angles::calculate_angle;
use super::error::{AnalyzerError, Result};
use super::feedback::{FeedbackBand, DEFAULT_THROTTLE_MS};
use super::landmarks::{LandmarkSet, RequiredJoints};
use super::smoothing::{DEFAULT_WARMUP, DEFAULT_WINDOW};
use super::stage::{Stage, Transition};

/// Horizontal offset of the synthetic reference point used for torso angles
pub const TORSO_REFERENCE_OFFSET: f32 = 0.2;

// ============================================================================
// EXERCISE KINDS
// ============================================================================

/// Built-in exercise variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Hip hinge, measured at the hips
    Deadlift,
    /// Torso flexion, measured against the horizontal
    Situp,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 2] = [ExerciseKind::Deadlift, ExerciseKind::Situp];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Deadlift => "deadlift",
            ExerciseKind::Situp => "situp",
        }
    }

    /// Preset configuration for this exercise
    pub fn config(&self) -> ExerciseConfig {
        match self {
            ExerciseKind::Deadlift => ExerciseConfig::deadlift(),
            ExerciseKind::Situp => ExerciseConfig::situp(),
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deadlift" => Ok(ExerciseKind::Deadlift),
            "situp" | "sit-up" | "sit_up" => Ok(ExerciseKind::Situp),
            _ => Err(AnalyzerError::unknown_exercise(s)),
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ANGLE SOURCE AND ADJUSTMENT
// ============================================================================

/// How the tracked angle is measured from a landmark set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleSource {
    /// Mean of the left and right shoulder-hip-knee angles
    HipAngle,
    /// Angle at the hip midpoint between the shoulder midpoint and a
    /// point `reference_offset` to the right of the hip
    TorsoIncline { reference_offset: f32 },
}

impl AngleSource {
    /// Raw angle for this frame, `None` on degenerate geometry
    pub fn measure(&self, set: &LandmarkSet) -> Option<f32> {
        match *self {
            AngleSource::HipAngle => {
                let left = calculate_angle(set.left_shoulder, set.left_hip, set.left_knee)?;
                let right = calculate_angle(set.right_shoulder, set.right_hip, set.right_knee)?;
                Some((left + right) / 2.0)
            }
            AngleSource::TorsoIncline { reference_offset } => {
                let hip = set.hip_midpoint();
                let horizontal = hip.offset(reference_offset, 0.0);
                calculate_angle(set.shoulder_midpoint(), hip, horizontal)
            }
        }
    }
}

/// Correction applied to the raw angle before smoothing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleAdjustment {
    None,
    /// Maps the torso angle so lying flat reads ~0° and sitting up ~90°:
    /// `90 - raw` while the shoulders are at or above the hips, then
    /// clamped to [0, 90]
    TorsoRaised,
}

impl AngleAdjustment {
    pub fn apply(&self, raw: f32, set: &LandmarkSet) -> f32 {
        match self {
            AngleAdjustment::None => raw,
            AngleAdjustment::TorsoRaised => {
                // Image y grows downward: smaller y is higher on screen
                let adjusted = if set.shoulder_midpoint().y <= set.hip_midpoint().y {
                    90.0 - raw
                } else {
                    raw
                };
                adjusted.clamp(0.0, 90.0)
            }
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_warmup() -> usize {
    DEFAULT_WARMUP
}

fn default_throttle_ms() -> f64 {
    DEFAULT_THROTTLE_MS
}

/// Everything that distinguishes one exercise from another
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Machine name, e.g. "deadlift"
    pub name: String,
    /// Human-readable name, e.g. "Sit-up"
    pub display_name: String,
    /// Label for the tracked angle, e.g. "Hip Angle"
    pub angle_label: String,
    /// Prompt shown while no pose is detected
    pub positioning_hint: String,
    #[serde(default)]
    pub instructions: Vec<String>,

    pub joints: RequiredJoints,
    pub angle_source: AngleSource,
    #[serde(default = "no_adjustment")]
    pub adjustment: AngleAdjustment,

    pub initial_stage: Stage,
    pub up_threshold: f32,
    pub down_threshold: f32,
    pub counted_transition: Transition,

    #[serde(default)]
    pub feedback: Vec<FeedbackBand>,

    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_warmup")]
    pub warmup: usize,
    #[serde(default = "default_throttle_ms")]
    pub feedback_throttle_ms: f64,
}

fn no_adjustment() -> AngleAdjustment {
    AngleAdjustment::None
}

impl ExerciseConfig {
    /// Hip hinge: standing is Up (>160°), hinged is Down (<130°).
    /// A rep completes on the way back up.
    pub fn deadlift() -> Self {
        Self {
            name: "deadlift".into(),
            display_name: "Deadlift".into(),
            angle_label: "Hip Angle".into(),
            positioning_hint: "Position yourself facing the camera".into(),
            instructions: vec![
                "Stand facing the camera with feet hip-width apart".into(),
                "Keep your full body visible in the frame".into(),
                "Perform deadlifts with proper form".into(),
                "The system will automatically count your reps".into(),
            ],
            joints: RequiredJoints::HipHinge,
            angle_source: AngleSource::HipAngle,
            adjustment: AngleAdjustment::None,
            initial_stage: Stage::Up,
            up_threshold: 160.0,
            down_threshold: 130.0,
            counted_transition: Transition::DownToUp,
            feedback: vec![
                FeedbackBand::new("Good depth!").below(120.0),
                FeedbackBand::new("Go deeper - hinge at hips")
                    .in_stage(Stage::Down)
                    .above(140.0),
            ],
            window: DEFAULT_WINDOW,
            warmup: DEFAULT_WARMUP,
            feedback_throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }

    /// Torso flexion: lying back is Down (<20°), raised is Up (>45°).
    /// A rep completes on the way back down.
    pub fn situp() -> Self {
        Self {
            name: "situp".into(),
            display_name: "Sit-up".into(),
            angle_label: "Torso Angle".into(),
            positioning_hint: "Position yourself sideways to the camera".into(),
            instructions: vec![
                "Lie sideways to the camera on a mat".into(),
                "Keep your full body visible in the frame".into(),
                "Perform sit-ups with hands behind head".into(),
                "The system will automatically count your reps".into(),
            ],
            joints: RequiredJoints::TorsoFlexion,
            angle_source: AngleSource::TorsoIncline {
                reference_offset: TORSO_REFERENCE_OFFSET,
            },
            adjustment: AngleAdjustment::TorsoRaised,
            initial_stage: Stage::Down,
            up_threshold: 45.0,
            down_threshold: 20.0,
            counted_transition: Transition::UpToDown,
            feedback: vec![
                FeedbackBand::new("Good sit-up!").in_stage(Stage::Up).above(50.0),
                FeedbackBand::new("Sit up higher!").in_stage(Stage::Up).below(35.0),
                FeedbackBand::new("Lie down completely!").in_stage(Stage::Down).above(25.0),
            ],
            window: DEFAULT_WINDOW,
            warmup: DEFAULT_WARMUP,
            feedback_throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ExerciseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce a broken analyzer
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(AnalyzerError::invalid_config("smoothing window must be positive"));
        }
        if self.warmup == 0 || self.warmup > self.window {
            return Err(AnalyzerError::invalid_config(format!(
                "warmup {} must be between 1 and window {}",
                self.warmup, self.window
            )));
        }
        if !self.up_threshold.is_finite() || !self.down_threshold.is_finite() {
            return Err(AnalyzerError::invalid_config("thresholds must be finite"));
        }
        if self.up_threshold <= self.down_threshold {
            return Err(AnalyzerError::invalid_config(format!(
                "up threshold {} must be above down threshold {}",
                self.up_threshold, self.down_threshold
            )));
        }
        if self.feedback_throttle_ms.is_nan() || self.feedback_throttle_ms < 0.0 {
            return Err(AnalyzerError::invalid_config(
                "feedback throttle must be a non-negative number of milliseconds",
            ));
        }
        if let AngleSource::TorsoIncline { reference_offset } = self.angle_source {
            if reference_offset == 0.0 || !reference_offset.is_finite() {
                return Err(AnalyzerError::invalid_config(
                    "torso reference offset must be finite and non-zero",
                ));
            }
        }
        Ok(())
    }
}
