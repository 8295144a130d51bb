use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::{SessionState, StoriesState, WorkspaceManagerState};

/// Deployment environment the front end runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
    Test,
}

/// Static application metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub title: String,
    pub environment: Environment,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            title: "Source Academy".to_string(),
            environment: Environment::default(),
        }
    }
}

/// The complete application state held by the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub application: ApplicationState,
    pub session: SessionState,
    pub workspaces: WorkspaceManagerState,
    pub stories: StoriesState,
}

/// The canonical default state.
///
/// Built once per process and only ever read; hydration layers persisted values
/// over a clone of it.
pub fn default_state() -> &'static AppState {
    static DEFAULT: OnceLock<AppState> = OnceLock::new();
    DEFAULT.get_or_init(AppState::default)
}
