//! End-of-session summary
//!
//! Collected by the analyzer as frames arrive and handed to whoever
//! persists results. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

/// What a finished session produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise: String,
    pub total_reps: u32,
    /// Mean smoothed angle over every analyzed frame
    pub avg_angle: Option<f32>,
    /// Smoothed angle of the last analyzed frame
    pub last_angle: Option<f32>,
    /// Every feedback message emitted, in order
    pub feedback: Vec<String>,
    /// Frames that produced a result
    pub frames_analyzed: u32,
    /// Frames dropped for missing landmarks, bad geometry or warm-up
    pub frames_skipped: u32,
}

/// Running session statistics
#[derive(Clone, Debug, Default)]
pub(crate) struct SessionStats {
    angle_sum: f64,
    last_angle: Option<f32>,
    feedback: Vec<String>,
    frames_analyzed: u32,
    frames_skipped: u32,
}

impl SessionStats {
    pub(crate) fn record_frame(&mut self, smoothed_angle: f32, feedback: &[String]) {
        self.angle_sum += f64::from(smoothed_angle);
        self.last_angle = Some(smoothed_angle);
        self.frames_analyzed = self.frames_analyzed.saturating_add(1);
        self.feedback.extend_from_slice(feedback);
    }

    pub(crate) fn record_skip(&mut self) {
        self.frames_skipped = self.frames_skipped.saturating_add(1);
    }

    pub(crate) fn summarize(&self, exercise: &str, total_reps: u32) -> SessionSummary {
        let avg_angle = (self.frames_analyzed > 0)
            .then(|| (self.angle_sum / f64::from(self.frames_analyzed)) as f32);

        SessionSummary {
            exercise: exercise.to_string(),
            total_reps,
            avg_angle,
            last_angle: self.last_angle,
            feedback: self.feedback.clone(),
            frames_analyzed: self.frames_analyzed,
            frames_skipped: self.frames_skipped,
        }
    }
}
