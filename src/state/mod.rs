//! Application state shape.
//!
//! [`AppState`] is both the canonical default template and the live state held by
//! the store. Every field is always populated.

mod action;
mod app;
mod session;
mod stories;
mod workspace;

pub use action::Action;
pub use app::{default_state, AppState, ApplicationState, Environment};
pub use session::{Role, SessionState};
pub use stories::StoriesState;
pub use workspace::{
    Chapter, EditorTab, ExternalLibrary, LanguageContext, PlaygroundWorkspace, Variant,
    WorkspaceManagerState,
};
