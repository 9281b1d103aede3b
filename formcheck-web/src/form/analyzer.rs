//! Exercise analyzer - per-frame rep counting and form feedback
//!
//! One generic pipeline parameterized by `ExerciseConfig`:
//! adapt landmarks → measure angle → adjust → smooth → stage transition
//! → rep count → throttled feedback → snapshot.
//!
//! Processing is synchronous and O(1) per frame. An analyzer holds one
//! session; use separate instances for concurrent sessions.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::clock::{Clock, SystemClock};
use super::error::Result;
use super::exercise::{ExerciseConfig, ExerciseKind};
use super::feedback::FeedbackGenerator;
use super::landmarks::{Landmark, LandmarkAdapter, LandmarkSet};
use super::reps::RepCounter;
use super::smoothing::SmoothedAngleTracker;
use super::stage::{Stage, StageMachine};
use super::summary::{SessionStats, SessionSummary};

/// Snapshot produced by one analyzed frame
///
/// Serialized field names match what the page renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rep_count: u32,
    #[serde(rename = "current_stage")]
    pub stage: Stage,
    /// Smoothed angle in degrees
    #[serde(rename = "angle")]
    pub smoothed_angle: f32,
    #[serde(rename = "form_feedback")]
    pub feedback: Vec<String>,
}

/// Session state mutated by `analyze_frame` and rebuilt by `reset`
pub struct AnalysisState {
    pub(crate) stage: StageMachine,
    pub(crate) reps: RepCounter,
    pub(crate) history: SmoothedAngleTracker,
    pub(crate) feedback: FeedbackGenerator,
    pub(crate) stats: SessionStats,
}

impl AnalysisState {
    fn new(config: &ExerciseConfig) -> Self {
        Self {
            stage: StageMachine::new(
                config.initial_stage,
                config.up_threshold,
                config.down_threshold,
            ),
            reps: RepCounter::new(config.counted_transition),
            history: SmoothedAngleTracker::new(config.window, config.warmup),
            feedback: FeedbackGenerator::new(config.feedback.clone(), config.feedback_throttle_ms),
            stats: SessionStats::default(),
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.reps.count()
    }

    pub fn stage(&self) -> Stage {
        self.stage.stage()
    }

    pub fn history(&self) -> &SmoothedAngleTracker {
        &self.history
    }

    pub fn last_feedback_at(&self) -> Option<f64> {
        self.feedback.last_emitted_at()
    }

    fn reset(&mut self) {
        self.stage.reset();
        self.reps.reset();
        self.history.clear();
        self.feedback.reset();
        self.stats = SessionStats::default();
    }
}

/// Rep counter and form checker for one exercise session
pub struct ExerciseAnalyzer {
    config: ExerciseConfig,
    kind: Option<ExerciseKind>,
    adapter: LandmarkAdapter,
    state: AnalysisState,
    clock: Box<dyn Clock>,
}

impl ExerciseAnalyzer {
    /// Analyzer for a built-in exercise
    pub fn new(kind: ExerciseKind) -> Self {
        let mut analyzer = Self::build(kind.config());
        analyzer.kind = Some(kind);
        analyzer
    }

    /// Analyzer for an exercise given by name, e.g. "deadlift" or "situp"
    pub fn for_exercise(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// Analyzer for a custom configuration; rejected if invalid
    pub fn from_config(config: ExerciseConfig) -> Result<Self> {
        config.validate()?;
        let kind = config.name.parse().ok().filter(|k: &ExerciseKind| k.config() == config);
        let mut analyzer = Self::build(config);
        analyzer.kind = kind;
        Ok(analyzer)
    }

    fn build(config: ExerciseConfig) -> Self {
        info!(
            exercise = %config.name,
            up = config.up_threshold,
            down = config.down_threshold,
            "exercise analyzer created"
        );
        Self {
            adapter: LandmarkAdapter::new(config.joints),
            state: AnalysisState::new(&config),
            kind: None,
            clock: Box::new(SystemClock),
            config,
        }
    }

    /// Replace the wall clock used for feedback throttling
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Analyze one frame of raw landmarks at the current time
    ///
    /// Returns `None` when the frame cannot be used yet: landmarks missing,
    /// degenerate geometry, or the smoothing window still warming up.
    pub fn analyze_frame(&mut self, raw: &[Landmark]) -> Option<AnalysisResult> {
        let now_ms = self.clock.now_ms();
        self.analyze_frame_at(raw, now_ms)
    }

    /// Analyze one frame of raw landmarks at an explicit time (ms)
    pub fn analyze_frame_at(&mut self, raw: &[Landmark], now_ms: f64) -> Option<AnalysisResult> {
        let Some(set) = self.adapter.adapt(raw) else {
            trace!(exercise = %self.config.name, "landmarks unavailable");
            self.state.stats.record_skip();
            return None;
        };
        self.analyze_points(&set, now_ms)
    }

    /// Analyze an already adapted landmark set at an explicit time (ms)
    pub fn analyze_points(&mut self, set: &LandmarkSet, now_ms: f64) -> Option<AnalysisResult> {
        let Some(raw_angle) = self.config.angle_source.measure(set) else {
            trace!(exercise = %self.config.name, "degenerate joint geometry");
            self.state.stats.record_skip();
            return None;
        };
        let angle = self.config.adjustment.apply(raw_angle, set);

        self.state.history.push(Some(angle));
        let Some(smoothed) = self.state.history.mean() else {
            trace!(samples = self.state.history.len(), "smoothing warm-up");
            self.state.stats.record_skip();
            return None;
        };

        if let Some(transition) = self.state.stage.update(smoothed) {
            debug!(?transition, angle = smoothed, "stage transition");
            if self.state.reps.observe(transition) {
                info!(reps = self.state.reps.count(), exercise = %self.config.name, "rep counted");
            }
        }

        let stage = self.state.stage.stage();
        let feedback: Vec<String> = self
            .state
            .feedback
            .evaluate(stage, smoothed, now_ms)
            .into_iter()
            .collect();

        self.state.stats.record_frame(smoothed, &feedback);

        Some(AnalysisResult {
            rep_count: self.state.reps.count(),
            stage,
            smoothed_angle: smoothed,
            feedback,
        })
    }

    /// Start a fresh session: zero reps, initial stage, empty history
    pub fn reset(&mut self) {
        self.state.reset();
        info!(exercise = %self.config.name, "analyzer reset");
    }

    /// Summary of the session so far
    pub fn summary(&self) -> SessionSummary {
        self.state.stats.summarize(&self.config.name, self.state.rep_count())
    }

    pub fn rep_count(&self) -> u32 {
        self.state.rep_count()
    }

    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Built-in exercise this analyzer runs, `None` for custom configs
    pub fn kind(&self) -> Option<ExerciseKind> {
        self.kind
    }
}
