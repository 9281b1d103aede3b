//! Exercise session held for the page
//!
//! One analyzer per page, kept in thread-local storage (WASM is
//! single-threaded). JavaScript starts a session, feeds it one landmark
//! frame per camera frame, and ends it to collect the summary.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::form::{AnalyzerError, ExerciseAnalyzer, ExerciseConfig};
use super::landmarks::parse_landmarks;

impl From<AnalyzerError> for JsValue {
    fn from(err: AnalyzerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Labels and instructions the page shows for the running exercise
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExerciseInfo {
    pub name: String,
    pub display_name: String,
    pub angle_label: String,
    pub positioning_hint: String,
    pub instructions: Vec<String>,
    /// Pose landmark indices the analyzer reads (for highlighting)
    pub landmark_indices: Vec<usize>,
}

impl ExerciseInfo {
    pub fn from_config(config: &ExerciseConfig) -> Self {
        Self {
            name: config.name.clone(),
            display_name: config.display_name.clone(),
            angle_label: config.angle_label.clone(),
            positioning_hint: config.positioning_hint.clone(),
            instructions: config.instructions.clone(),
            landmark_indices: config.joints.indices(),
        }
    }
}

thread_local! {
    static SESSION: RefCell<Option<ExerciseAnalyzer>> = RefCell::new(None);
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Replace the current session with a new analyzer
pub fn install_session(analyzer: ExerciseAnalyzer) {
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(analyzer);
    });
}

/// Run `f` against the current session, `None` if there is none
pub fn with_session<R>(f: impl FnOnce(&mut ExerciseAnalyzer) -> R) -> Option<R> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Remove and return the current session
pub fn take_session() -> Option<ExerciseAnalyzer> {
    SESSION.with(|cell| cell.borrow_mut().take())
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Start a session for a built-in exercise ("deadlift" or "situp")
#[wasm_bindgen]
pub fn start_session(exercise: &str) -> Result<(), JsValue> {
    let analyzer = ExerciseAnalyzer::for_exercise(exercise)?;
    web_sys::console::log_1(&format!("✅ {} analysis started", analyzer.config().display_name).into());
    install_session(analyzer);
    Ok(())
}

/// Start a session from a JSON `ExerciseConfig`
#[wasm_bindgen]
pub fn start_custom_session(config_json: &str) -> Result<(), JsValue> {
    let config = ExerciseConfig::from_json(config_json)?;
    let analyzer = ExerciseAnalyzer::from_config(config)?;
    web_sys::console::log_1(&format!("✅ {} analysis started (custom)", analyzer.config().display_name).into());
    install_session(analyzer);
    Ok(())
}

/// Called from JavaScript with a flat Float32Array of x, y, z triples
///
/// Returns the analysis snapshot, or null while no result is available
/// (no session, landmarks missing, warm-up).
#[wasm_bindgen]
pub fn analyze_frame(data: &[f32]) -> JsValue {
    let Some(landmarks) = parse_landmarks(data) else {
        web_sys::console::warn_1(
            &format!("Invalid landmark data length: {} (expected multiple of 3)", data.len()).into()
        );
        return JsValue::NULL;
    };

    match with_session(|analyzer| analyzer.analyze_frame(&landmarks)) {
        Some(Some(result)) => to_js(&result),
        _ => JsValue::NULL,
    }
}

/// Zero the rep count and restart smoothing, keeping the exercise
#[wasm_bindgen]
pub fn reset_session() {
    if with_session(|analyzer| analyzer.reset()).is_none() {
        web_sys::console::warn_1(&"reset_session called without an active session".into());
    }
}

/// End the session and return its summary (null if none was running)
#[wasm_bindgen]
pub fn end_session() -> JsValue {
    match take_session() {
        Some(analyzer) => {
            let summary = analyzer.summary();
            web_sys::console::log_1(&format!("Session ended: {} reps", summary.total_reps).into());
            to_js(&summary)
        }
        None => JsValue::NULL,
    }
}

/// Current rep count (0 without a session)
#[wasm_bindgen]
pub fn get_rep_count() -> u32 {
    with_session(|analyzer| analyzer.rep_count()).unwrap_or(0)
}

/// Current stage name ("up" / "down")
#[wasm_bindgen]
pub fn get_stage() -> Option<String> {
    with_session(|analyzer| analyzer.stage().as_str().to_string())
}

/// Labels and instructions for the running exercise
#[wasm_bindgen]
pub fn get_exercise_info() -> JsValue {
    match with_session(|analyzer| ExerciseInfo::from_config(analyzer.config())) {
        Some(info) => to_js(&info),
        None => JsValue::NULL,
    }
}
