//! The persisted snapshot shape and its projection from live state.

mod lenient;
mod saved_state;

pub use saved_state::{SavedActiveTab, SavedEditorTab, SavedSession, SavedState};
