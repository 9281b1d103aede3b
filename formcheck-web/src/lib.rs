//! FormCheck Web - exercise rep counting and form feedback from pose landmarks
//!
//! Entry point for the WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The analysis itself lives in [`form`] and runs natively as well.

mod bridge;
pub mod form;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    analyze_frame, end_session, get_exercise_info, get_rep_count, get_stage,
    reset_session, start_custom_session, start_session,
};
pub use bridge::{parse_landmarks, ExerciseInfo};
pub use form::{AnalysisResult, ExerciseAnalyzer, ExerciseConfig, ExerciseKind, SessionSummary};

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log!("✅ FormCheck loaded: {} exercises available", ExerciseKind::ALL.len());
}

/// Names of the built-in exercises, for the exercise picker
#[wasm_bindgen]
pub fn available_exercises() -> Vec<String> {
    ExerciseKind::ALL.iter().map(|kind| kind.to_string()).collect()
}
