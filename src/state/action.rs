//! Actions accepted by the root reducer and the transitions they perform.

use serde_json::Value;

use super::{AppState, Chapter, EditorTab, ExternalLibrary, SessionState, Variant};
use crate::store::Reduce;

/// Actions that mutate [`AppState`] through [`Store::dispatch`](crate::Store::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Toggle folder mode in the playground.
    SetFolderMode(bool),
    /// Focus a playground tab; `None` clears focus.
    SetActiveEditorTab(Option<usize>),
    /// Append a tab and focus it.
    AddEditorTab(EditorTab),
    /// Replace the contents of a tab. Out-of-range indices are ignored.
    UpdateEditorValue { index: usize, value: String },
    SetAutorun(bool),
    SetExternalLibrary(ExternalLibrary),
    ChangeChapter(Chapter),
    ChangeVariant(Variant),
    /// Store backend tokens after a successful login.
    SetTokens {
        access_token: String,
        refresh_token: String,
    },
    /// Store a GitHub credential. The client is built on the next hydration.
    SetGitHubAccessToken(Option<String>),
    /// Reset the session, dropping tokens and the GitHub client.
    LogOut,
    SetStory { key: String, value: Value },
    RemoveStory(String),
}

impl Reduce<Action> for AppState {
    fn reduce(&mut self, action: Action) {
        let playground = &mut self.workspaces.playground;
        match action {
            Action::SetFolderMode(enabled) => playground.is_folder_mode_enabled = enabled,
            Action::SetActiveEditorTab(index) => playground.active_editor_tab_index = index,
            Action::AddEditorTab(tab) => {
                playground.editor_tabs.push(tab);
                playground.active_editor_tab_index = Some(playground.editor_tabs.len() - 1);
            }
            Action::UpdateEditorValue { index, value } => {
                if let Some(tab) = playground.editor_tabs.get_mut(index) {
                    tab.value = value;
                }
            }
            Action::SetAutorun(autorun) => playground.is_editor_autorun = autorun,
            Action::SetExternalLibrary(library) => playground.external_library = library,
            Action::ChangeChapter(chapter) => playground.context.chapter = chapter,
            Action::ChangeVariant(variant) => playground.context.variant = variant,
            Action::SetTokens {
                access_token,
                refresh_token,
            } => {
                self.session.access_token = Some(access_token);
                self.session.refresh_token = Some(refresh_token);
            }
            Action::SetGitHubAccessToken(token) => self.session.github_access_token = token,
            Action::LogOut => self.session = SessionState::default(),
            Action::SetStory { key, value } => {
                self.stories.insert(key, value);
            }
            Action::RemoveStory(key) => {
                self.stories.remove(&key);
            }
        }
    }
}
