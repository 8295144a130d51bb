use super::PresencePolicy;
use crate::client::{ClientFactory, ClientHandle};
use crate::snapshot::{SavedSession, SavedState};
use crate::state::{
    default_state, AppState, EditorTab, LanguageContext, PlaygroundWorkspace, SessionState,
    StoriesState, WorkspaceManagerState,
};

/// Rebuild a complete [`AppState`] from a persisted snapshot layered over `defaults`.
///
/// Returns `None` when there is no snapshot, meaning the caller should start from
/// `defaults` as-is. Otherwise each field group falls back to `defaults` on its own:
///
/// - `session` is a shallow overlay of the stored session, after which the GitHub
///   client is rebuilt from the stored credential (or cleared);
/// - the playground's editor settings and language context are taken from the
///   stored legacy keys when present under `policy`;
/// - `stories` is a per-key overlay;
/// - every other section is copied from `defaults`.
///
/// # Examples
///
/// ```
/// use playground_store::{hydrate, GitHubClientFactory, PresencePolicy, SavedState};
/// use playground_store::state::{default_state, Chapter};
///
/// let snapshot = SavedState {
///     playground_source_chapter: Some(Chapter::SOURCE_4),
///     ..SavedState::default()
/// };
/// let factory = GitHubClientFactory::default();
///
/// let state = hydrate(Some(snapshot), default_state(), &factory, PresencePolicy::Explicit)
///     .expect("snapshot present");
/// assert_eq!(state.workspaces.playground.context.chapter, Chapter::SOURCE_4);
/// assert!(hydrate(None, default_state(), &factory, PresencePolicy::Explicit).is_none());
/// ```
pub fn hydrate(
    snapshot: Option<SavedState>,
    defaults: &AppState,
    factory: &dyn ClientFactory,
    policy: PresencePolicy,
) -> Option<AppState> {
    let Some(saved) = snapshot else {
        log::debug!("no persisted snapshot, starting from defaults");
        return None;
    };

    let SavedState {
        session,
        playground_is_folder_mode_enabled,
        playground_active_editor_tab_index,
        playground_editor_tabs,
        playground_is_editor_autorun,
        playground_external_library,
        playground_source_chapter,
        playground_source_variant,
        stories,
    } = saved;

    let session = hydrate_session(session, &defaults.session, factory);

    let base = &defaults.workspaces.playground;
    let playground = PlaygroundWorkspace {
        is_folder_mode_enabled: policy
            .admit(playground_is_folder_mode_enabled)
            .unwrap_or(base.is_folder_mode_enabled),
        active_editor_tab_index: policy
            .admit(playground_active_editor_tab_index)
            .map(|wrapped| wrapped.value)
            .unwrap_or(base.active_editor_tab_index),
        editor_tabs: policy
            .admit(playground_editor_tabs)
            .map(|tabs| tabs.into_iter().map(EditorTab::from).collect())
            .unwrap_or_else(|| base.editor_tabs.clone()),
        is_editor_autorun: policy
            .admit(playground_is_editor_autorun)
            .unwrap_or(base.is_editor_autorun),
        external_library: policy
            .admit(playground_external_library)
            .unwrap_or(base.external_library),
        context: LanguageContext {
            chapter: policy
                .admit(playground_source_chapter)
                .unwrap_or(base.context.chapter),
            variant: policy
                .admit(playground_source_variant)
                .unwrap_or(base.context.variant),
        },
        ..base.clone()
    };

    let mut merged_stories = defaults.stories.clone();
    merged_stories.overlay(stories.unwrap_or_else(StoriesState::new));

    log::info!(
        "hydrated state from snapshot (chapter {}, {} tab(s), github client: {})",
        playground.context.chapter.get(),
        playground.editor_tabs.len(),
        session.github_client.is_some()
    );

    Some(AppState {
        session,
        workspaces: WorkspaceManagerState {
            playground,
            ..defaults.workspaces.clone()
        },
        stories: merged_stories,
        ..defaults.clone()
    })
}

/// [`hydrate`] against the process-wide [`default_state`] with explicit presence.
pub fn hydrate_with_defaults(
    snapshot: Option<SavedState>,
    factory: &dyn ClientFactory,
) -> Option<AppState> {
    hydrate(snapshot, default_state(), factory, PresencePolicy::Explicit)
}

fn hydrate_session(
    saved: Option<SavedSession>,
    defaults: &SessionState,
    factory: &dyn ClientFactory,
) -> SessionState {
    let saved = saved.unwrap_or_default();
    let credential = saved.github_access_token.clone();

    let mut session = defaults.clone();
    saved.overlay_onto(&mut session);
    // Always recomputed; a client is never carried over from anywhere else.
    session.github_client = synthesize_client(credential.as_deref(), factory);
    session
}

fn synthesize_client(credential: Option<&str>, factory: &dyn ClientFactory) -> Option<ClientHandle> {
    let credential = credential.filter(|c| !c.is_empty())?;
    match factory.make_client(credential) {
        Ok(client) => Some(ClientHandle::synthesize(client)),
        Err(err) => {
            log::warn!("ignoring stored GitHub credential: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GitHubClient, GitHubClientFactory};
    use crate::error::{Result, StoreError};
    use crate::snapshot::{SavedActiveTab, SavedEditorTab};
    use crate::state::{Chapter, ExternalLibrary, Variant};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct RejectingFactory;

    impl ClientFactory for RejectingFactory {
        fn make_client(&self, _credential: &str) -> Result<GitHubClient> {
            Err(StoreError::client("rejected"))
        }
    }

    fn factory() -> GitHubClientFactory {
        GitHubClientFactory::default()
    }

    #[test]
    fn absent_snapshot_means_no_override() {
        assert!(hydrate(None, &AppState::default(), &factory(), PresencePolicy::Explicit).is_none());
    }

    #[test]
    fn empty_snapshot_yields_defaults() {
        let defaults = AppState::default();
        let state = hydrate(
            Some(SavedState::default()),
            &defaults,
            &factory(),
            PresencePolicy::Explicit,
        )
        .unwrap();
        assert_eq!(state, defaults);
    }

    #[test]
    fn partial_playground_overlay() {
        let mut defaults = AppState::default();
        defaults.workspaces.playground.is_editor_autorun = true;
        defaults.workspaces.playground.editor_tabs = vec![EditorTab::new("A")];

        let snapshot = SavedState {
            playground_is_folder_mode_enabled: Some(true),
            playground_source_chapter: Some(Chapter::SOURCE_4),
            ..SavedState::default()
        };
        let state = hydrate(Some(snapshot), &defaults, &factory(), PresencePolicy::Explicit).unwrap();

        let mut expected = defaults.workspaces.playground.clone();
        expected.is_folder_mode_enabled = true;
        expected.context.chapter = Chapter::SOURCE_4;
        assert_eq!(state.workspaces.playground, expected);
        assert_eq!(state.workspaces.sicp, defaults.workspaces.sicp);
    }

    #[test]
    fn active_tab_is_unwrapped() {
        let snapshot = SavedState {
            playground_active_editor_tab_index: Some(SavedActiveTab { value: None }),
            playground_editor_tabs: Some(vec![
                SavedEditorTab {
                    file_path: Some("/playground/a.js".to_string()),
                    value: "1;".to_string(),
                },
                SavedEditorTab::default(),
            ]),
            ..SavedState::default()
        };
        let state = hydrate(
            Some(snapshot),
            &AppState::default(),
            &factory(),
            PresencePolicy::Explicit,
        )
        .unwrap();

        let playground = &state.workspaces.playground;
        assert_eq!(playground.active_editor_tab_index, None);
        assert_eq!(playground.editor_tabs.len(), 2);
        assert_eq!(playground.editor_tabs[0].file_path.as_deref(), Some("/playground/a.js"));
        assert!(playground.editor_tabs[0].breakpoints.is_empty());
    }

    #[test]
    fn falsy_values_depend_on_policy() {
        let mut defaults = AppState::default();
        defaults.workspaces.playground.is_editor_autorun = true;
        defaults.workspaces.playground.context.chapter = Chapter::SOURCE_2;

        let snapshot = SavedState {
            playground_is_editor_autorun: Some(false),
            playground_source_chapter: Some(Chapter(0)),
            playground_active_editor_tab_index: Some(SavedActiveTab { value: Some(0) }),
            ..SavedState::default()
        };

        let explicit = hydrate(Some(snapshot.clone()), &defaults, &factory(), PresencePolicy::Explicit)
            .unwrap();
        assert!(!explicit.workspaces.playground.is_editor_autorun);
        assert_eq!(explicit.workspaces.playground.context.chapter, Chapter(0));

        let truthy = hydrate(Some(snapshot), &defaults, &factory(), PresencePolicy::Truthy).unwrap();
        assert!(truthy.workspaces.playground.is_editor_autorun);
        assert_eq!(truthy.workspaces.playground.context.chapter, Chapter::SOURCE_2);
        assert_eq!(truthy.workspaces.playground.active_editor_tab_index, Some(0));
    }

    #[test]
    fn session_overlay_then_client_synthesis() {
        let mut defaults = AppState::default();
        defaults.session.course_id = Some(11);

        let snapshot = SavedState {
            session: Some(SavedSession {
                name: Some("Grace".to_string()),
                github_access_token: Some("tok123".to_string()),
                ..SavedSession::default()
            }),
            ..SavedState::default()
        };
        let state = hydrate(Some(snapshot), &defaults, &factory(), PresencePolicy::Explicit).unwrap();

        assert_eq!(state.session.name.as_deref(), Some("Grace"));
        assert_eq!(state.session.course_id, Some(11));
        let client = state.session.github_client.as_ref().unwrap().client();
        assert_eq!(client, &factory().make_client("tok123").unwrap());
    }

    #[test]
    fn empty_credential_yields_no_client() {
        let snapshot = SavedState {
            session: Some(SavedSession {
                github_access_token: Some(String::new()),
                ..SavedSession::default()
            }),
            ..SavedState::default()
        };
        let state = hydrate(
            Some(snapshot),
            &AppState::default(),
            &factory(),
            PresencePolicy::Explicit,
        )
        .unwrap();
        assert!(state.session.github_client.is_none());
    }

    #[test]
    fn rejected_credential_keeps_rest_of_session() {
        let snapshot = SavedState {
            session: Some(SavedSession {
                name: Some("Linus".to_string()),
                github_access_token: Some("bad".to_string()),
                ..SavedSession::default()
            }),
            ..SavedState::default()
        };
        let state = hydrate(
            Some(snapshot),
            &AppState::default(),
            &RejectingFactory,
            PresencePolicy::Explicit,
        )
        .unwrap();
        assert!(state.session.github_client.is_none());
        assert_eq!(state.session.name.as_deref(), Some("Linus"));
        assert_eq!(state.session.github_access_token.as_deref(), Some("bad"));
    }

    #[test]
    fn stories_overlay_per_key() {
        let mut defaults = AppState::default();
        defaults.stories = [("s1", json!("x")), ("s2", json!("y"))].into_iter().collect();

        let snapshot = SavedState {
            stories: Some([("s2", json!("z")), ("s3", json!("w"))].into_iter().collect()),
            ..SavedState::default()
        };
        let state = hydrate(Some(snapshot), &defaults, &factory(), PresencePolicy::Explicit).unwrap();

        let expected: StoriesState = [("s1", json!("x")), ("s2", json!("z")), ("s3", json!("w"))]
            .into_iter()
            .collect();
        assert_eq!(state.stories, expected);
    }

    #[test]
    fn library_and_variant_restored() {
        let snapshot = SavedState {
            playground_external_library: Some(ExternalLibrary::Sounds),
            playground_source_variant: Some(Variant::Lazy),
            ..SavedState::default()
        };
        let state = hydrate_with_defaults(Some(snapshot), &factory()).unwrap();
        assert_eq!(state.workspaces.playground.external_library, ExternalLibrary::Sounds);
        assert_eq!(state.workspaces.playground.context.variant, Variant::Lazy);
        assert_eq!(state.application, default_state().application);
    }
}
