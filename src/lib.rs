//! # Playground Store
//!
//! Application state store for a code playground.
//!
//! The store's initial state is rebuilt from whatever an earlier run persisted,
//! and the live state is written back on a throttle:
//!
//! ```text
//! snapshot -> hydrate -> Store<AppState> -> commits -> PersistenceTrigger -> snapshot
//! ```
//!
//! - [`state`]: the [`AppState`] shape, its defaults, and the root reducer.
//! - [`snapshot`]: [`SavedState`], the narrow, all-optional persisted form.
//! - [`hydrate`](mod@hydrate): layering a snapshot over the default state.
//! - [`store`]: [`Store<T>`] with disposable [`Subscription`]s.
//! - [`persist`]: persistence media and the throttled [`PersistenceTrigger`].
//! - [`client`]: the GitHub client derived from the stored credential.
//!
//! [`create_store`] wires everything together.

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod error;
pub mod hydrate;
pub mod persist;
pub mod snapshot;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use bootstrap::{create_store, AppStore};
pub use client::{ClientFactory, ClientHandle, GitHubClient, GitHubClientFactory, GitHubConfig};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use hydrate::{hydrate, hydrate_with_defaults, PresencePolicy};
pub use persist::{
    JsonFileMedium, MemoryMedium, PersistenceMedium, PersistenceTrigger, Throttle, ThrottleConfig,
};
pub use snapshot::SavedState;
pub use state::{default_state, Action, AppState};
pub use store::{Reduce, Store, Subscription};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let store = Store::new(AppState::default());
        store.dispatch(Action::SetFolderMode(true));
        assert!(store.read(|s| s.workspaces.playground.is_folder_mode_enabled));
    }
}
