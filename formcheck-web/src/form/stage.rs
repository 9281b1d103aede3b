//! Two-stage movement state machine with hysteresis
//!
//! The up and down thresholds are deliberately apart. A transition only
//! fires when the smoothed angle crosses the threshold of the opposite
//! stage, so an angle hovering in the gap never flips the stage.

use serde::{Deserialize, Serialize};

/// Movement phase of the current repetition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Up,
    Down,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Up => "up",
            Stage::Down => "down",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage change produced by one smoothed sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Angle rose above the up threshold
    DownToUp,
    /// Angle fell below the down threshold
    UpToDown,
}

impl Transition {
    /// Stage entered by this transition
    pub fn target(&self) -> Stage {
        match self {
            Transition::DownToUp => Stage::Up,
            Transition::UpToDown => Stage::Down,
        }
    }
}

/// Stage machine driven by the smoothed angle
#[derive(Clone, Debug)]
pub struct StageMachine {
    initial: Stage,
    current: Stage,
    /// Down → Up fires strictly above this angle
    up_threshold: f32,
    /// Up → Down fires strictly below this angle
    down_threshold: f32,
}

impl StageMachine {
    pub fn new(initial: Stage, up_threshold: f32, down_threshold: f32) -> Self {
        Self {
            initial,
            current: initial,
            up_threshold,
            down_threshold,
        }
    }

    pub fn stage(&self) -> Stage {
        self.current
    }

    pub fn initial(&self) -> Stage {
        self.initial
    }

    /// Advance with one smoothed angle, returning the transition if any
    pub fn update(&mut self, smoothed_angle: f32) -> Option<Transition> {
        let transition = match self.current {
            Stage::Down if smoothed_angle > self.up_threshold => Transition::DownToUp,
            Stage::Up if smoothed_angle < self.down_threshold => Transition::UpToDown,
            _ => return None,
        };

        self.current = transition.target();
        Some(transition)
    }

    /// Return to the initial stage
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
