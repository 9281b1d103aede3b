//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod session;

pub use landmarks::{parse_landmarks, LANDMARK_STRIDE};

pub use session::{
    // WASM entry points
    start_session,
    start_custom_session,
    analyze_frame,
    reset_session,
    end_session,
    get_rep_count,
    get_stage,
    get_exercise_info,
    // Internal API
    install_session,
    with_session,
    take_session,
    ExerciseInfo,
};
