//! Landmark adaptation
//!
//! Picks the joints an exercise needs out of the raw MediaPipe Pose
//! landmark collection (33 points per frame) and returns them as a
//! named `LandmarkSet`.

use serde::{Deserialize, Serialize};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;

/// Number of landmarks MediaPipe Pose reports per frame
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Joints every exercise needs: (left, right) pairs for shoulder, hip, knee
const BODY_JOINTS: [usize; 6] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single raw landmark as delivered by the pose detector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,  // 0-1 normalized
    pub y: f32,  // 0-1 normalized, grows downward
    pub z: f32,  // Relative depth (unused by the 2D analysis)
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn point(&self) -> PosePoint {
        PosePoint::new(self.x, self.y)
    }
}

/// A 2D joint coordinate in frame-relative units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PosePoint {
    pub x: f32,
    pub y: f32,
}

impl PosePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(a: PosePoint, b: PosePoint) -> PosePoint {
        PosePoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> PosePoint {
        PosePoint::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Named joints for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet {
    pub left_shoulder: PosePoint,
    pub right_shoulder: PosePoint,
    pub left_hip: PosePoint,
    pub right_hip: PosePoint,
    pub left_knee: PosePoint,
    pub right_knee: PosePoint,
    /// Head reference (nose). Only used for orientation, never for angles.
    pub head: Option<PosePoint>,
}

impl LandmarkSet {
    pub fn shoulder_midpoint(&self) -> PosePoint {
        PosePoint::midpoint(self.left_shoulder, self.right_shoulder)
    }

    pub fn hip_midpoint(&self) -> PosePoint {
        PosePoint::midpoint(self.left_hip, self.right_hip)
    }

    /// Whether the head is left of the hips on screen
    ///
    /// Tells which way a lying subject faces the camera. `None` without
    /// a head reference.
    pub fn head_points_left(&self) -> Option<bool> {
        self.head.map(|head| head.x < self.hip_midpoint().x)
    }
}

/// Which joints an exercise variant reads from the raw collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredJoints {
    /// Shoulder, hip and knee pairs
    HipHinge,
    /// Hip-hinge joints plus the head reference
    TorsoFlexion,
}

impl RequiredJoints {
    pub fn needs_head(&self) -> bool {
        matches!(self, RequiredJoints::TorsoFlexion)
    }

    /// Raw indices this joint set reads
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = BODY_JOINTS.to_vec();
        if self.needs_head() {
            indices.insert(0, NOSE);
        }
        indices
    }
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Extracts a `LandmarkSet` from a raw indexed landmark collection
#[derive(Clone, Copy, Debug)]
pub struct LandmarkAdapter {
    joints: RequiredJoints,
}

impl LandmarkAdapter {
    pub fn new(joints: RequiredJoints) -> Self {
        Self { joints }
    }

    pub fn joints(&self) -> RequiredJoints {
        self.joints
    }

    /// Adapt one frame of raw landmarks
    ///
    /// An empty slice stands for "no pose this frame". Returns `None` when
    /// a required index is missing or holds a non-finite coordinate.
    pub fn adapt(&self, raw: &[Landmark]) -> Option<LandmarkSet> {
        let joint = |index: usize| -> Option<PosePoint> {
            let point = raw.get(index)?.point();
            point.is_finite().then_some(point)
        };

        let head = if self.joints.needs_head() {
            Some(joint(NOSE)?)
        } else {
            None
        };

        Some(LandmarkSet {
            left_shoulder: joint(LEFT_SHOULDER)?,
            right_shoulder: joint(RIGHT_SHOULDER)?,
            left_hip: joint(LEFT_HIP)?,
            right_hip: joint(RIGHT_HIP)?,
            left_knee: joint(LEFT_KNEE)?,
            right_knee: joint(RIGHT_KNEE)?,
            head,
        })
    }
}
