//! Throttled form feedback
//!
//! Picks an advisory message from fixed per-exercise angle bands. At most
//! one message is emitted per throttle interval, however fast frames
//! arrive. Feedback never touches the rep count or the stage.

use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// Default minimum time between two emitted messages
pub const DEFAULT_THROTTLE_MS: f64 = 2000.0;

/// One feedback rule: message shown when stage and angle band match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackBand {
    /// Stage the rule applies to; `None` matches either stage
    #[serde(default)]
    pub stage: Option<Stage>,
    /// Angle must be strictly above this bound
    #[serde(default)]
    pub above: Option<f32>,
    /// Angle must be strictly below this bound
    #[serde(default)]
    pub below: Option<f32>,
    pub message: String,
}

impl FeedbackBand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            stage: None,
            above: None,
            below: None,
            message: message.into(),
        }
    }

    pub fn in_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn above(mut self, angle: f32) -> Self {
        self.above = Some(angle);
        self
    }

    pub fn below(mut self, angle: f32) -> Self {
        self.below = Some(angle);
        self
    }

    pub fn matches(&self, stage: Stage, angle: f32) -> bool {
        self.stage.map_or(true, |s| s == stage)
            && self.above.map_or(true, |bound| angle > bound)
            && self.below.map_or(true, |bound| angle < bound)
    }
}

/// Band matcher with a wall-clock throttle
#[derive(Clone, Debug)]
pub struct FeedbackGenerator {
    bands: Vec<FeedbackBand>,
    throttle_ms: f64,
    /// Time of the last emitted message; `None` until the first one
    last_emitted_at: Option<f64>,
}

impl FeedbackGenerator {
    pub fn new(bands: Vec<FeedbackBand>, throttle_ms: f64) -> Self {
        Self {
            bands,
            throttle_ms,
            last_emitted_at: None,
        }
    }

    /// Message for this frame, if the throttle allows one and a band matches
    ///
    /// The first matching band wins. The throttle timestamp only moves
    /// when a message is returned.
    pub fn evaluate(&mut self, stage: Stage, angle: f32, now_ms: f64) -> Option<String> {
        if let Some(last) = self.last_emitted_at {
            if now_ms - last <= self.throttle_ms {
                return None;
            }
        }

        let message = self
            .bands
            .iter()
            .find(|band| band.matches(stage, angle))?
            .message
            .clone();

        self.last_emitted_at = Some(now_ms);
        Some(message)
    }

    pub fn last_emitted_at(&self) -> Option<f64> {
        self.last_emitted_at
    }

    pub fn bands(&self) -> &[FeedbackBand] {
        &self.bands
    }

    pub fn reset(&mut self) {
        self.last_emitted_at = None;
    }
}
