use serde::{Deserialize, Serialize};

use super::lenient;
use crate::state::{
    AppState, Chapter, EditorTab, ExternalLibrary, Role, SessionState, StoriesState, Variant,
};

/// Persisted subset of [`SessionState`].
///
/// There is deliberately no slot for the derived client: only the raw
/// credential is stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub course_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub enable_stories: Option<bool>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub github_access_token: Option<String>,
}

impl SavedSession {
    /// Shallow overlay: every stored field replaces the corresponding session field.
    ///
    /// The derived client is left untouched.
    pub fn overlay_onto(self, session: &mut SessionState) {
        if let Some(access_token) = self.access_token {
            session.access_token = Some(access_token);
        }
        if let Some(refresh_token) = self.refresh_token {
            session.refresh_token = Some(refresh_token);
        }
        if let Some(name) = self.name {
            session.name = Some(name);
        }
        if let Some(user_id) = self.user_id {
            session.user_id = Some(user_id);
        }
        if let Some(role) = self.role {
            session.role = Some(role);
        }
        if let Some(course_id) = self.course_id {
            session.course_id = Some(course_id);
        }
        if let Some(enable_stories) = self.enable_stories {
            session.enable_stories = enable_stories;
        }
        if let Some(token) = self.github_access_token {
            session.github_access_token = Some(token);
        }
    }
}

impl From<&SessionState> for SavedSession {
    fn from(session: &SessionState) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            name: session.name.clone(),
            user_id: session.user_id,
            role: session.role,
            course_id: session.course_id,
            enable_stories: Some(session.enable_stories),
            github_access_token: session.github_access_token.clone(),
        }
    }
}

/// Stored form of the active tab index, wrapped so that `null` can be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedActiveTab {
    pub value: Option<usize>,
}

/// Stored form of an editor tab. Breakpoints and highlights are not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEditorTab {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub value: String,
}

impl From<&EditorTab> for SavedEditorTab {
    fn from(tab: &EditorTab) -> Self {
        Self {
            file_path: tab.file_path.clone(),
            value: tab.value.clone(),
        }
    }
}

impl From<SavedEditorTab> for EditorTab {
    fn from(saved: SavedEditorTab) -> Self {
        EditorTab {
            file_path: saved.file_path,
            value: saved.value,
            ..EditorTab::default()
        }
    }
}

/// The snapshot written to and read from the persistence medium.
///
/// Field names are the flattened legacy keys used on disk. Every field is
/// independently optional, and a malformed field decodes as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub session: Option<SavedSession>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_is_folder_mode_enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_active_editor_tab_index: Option<SavedActiveTab>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_editor_tabs: Option<Vec<SavedEditorTab>>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_is_editor_autorun: Option<bool>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_external_library: Option<ExternalLibrary>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_source_chapter: Option<Chapter>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub playground_source_variant: Option<Variant>,
    #[serde(default, deserialize_with = "lenient::deserialize", skip_serializing_if = "Option::is_none")]
    pub stories: Option<StoriesState>,
}

impl From<&AppState> for SavedState {
    fn from(state: &AppState) -> Self {
        let playground = &state.workspaces.playground;
        Self {
            session: Some(SavedSession::from(&state.session)),
            playground_is_folder_mode_enabled: Some(playground.is_folder_mode_enabled),
            playground_active_editor_tab_index: Some(SavedActiveTab {
                value: playground.active_editor_tab_index,
            }),
            playground_editor_tabs: Some(
                playground.editor_tabs.iter().map(SavedEditorTab::from).collect(),
            ),
            playground_is_editor_autorun: Some(playground.is_editor_autorun),
            playground_external_library: Some(playground.external_library),
            playground_source_chapter: Some(playground.context.chapter),
            playground_source_variant: Some(playground.context.variant),
            stories: Some(state.stories.clone()),
        }
    }
}
