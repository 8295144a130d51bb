//! Building the application store.

use std::sync::Arc;

use crate::client::{ClientFactory, GitHubClientFactory};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::hydrate::hydrate;
use crate::persist::{JsonFileMedium, PersistenceMedium, PersistenceTrigger};
use crate::state::{default_state, AppState};
use crate::store::Store;

/// The application store together with its persistence wiring.
///
/// Create one at startup and keep it for the life of the process. Dropping it
/// writes any pending state and stops persistence; the [`Store`] clones handed
/// out earlier keep working but are no longer saved.
pub struct AppStore {
    store: Store<AppState>,
    trigger: PersistenceTrigger,
    hydrated: bool,
}

impl AppStore {
    /// [`create_store`] with a [`JsonFileMedium`] at `config.snapshot_path` and a
    /// [`GitHubClientFactory`] built from `config.github`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let medium = Arc::new(JsonFileMedium::new(&config.snapshot_path));
        let factory = GitHubClientFactory::new(config.github.clone());
        create_store(config, medium, &factory)
    }

    pub fn store(&self) -> &Store<AppState> {
        &self.store
    }

    /// Whether the initial state came from a persisted snapshot.
    pub fn was_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Write any pending state now.
    pub fn flush(&self) {
        self.trigger.flush();
    }

    /// Stop persistence after writing any pending state.
    pub fn shutdown(self) {
        self.trigger.dispose();
    }
}

/// Load the persisted snapshot, hydrate the initial state, and attach persistence.
///
/// A snapshot that cannot be read is logged and treated as absent, so a damaged
/// file never blocks startup. It will be overwritten by the next save.
pub fn create_store(
    config: &StoreConfig,
    medium: Arc<dyn PersistenceMedium>,
    factory: &dyn ClientFactory,
) -> Result<AppStore> {
    let snapshot = match medium.load() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::warn!("could not load persisted state, starting fresh: {err}");
            None
        }
    };

    let hydrated = hydrate(snapshot, default_state(), factory, config.presence);
    let was_hydrated = hydrated.is_some();
    let initial = hydrated.unwrap_or_else(|| default_state().clone());

    let store = Store::new(initial);
    let trigger = PersistenceTrigger::attach(&store, medium, config.throttle)?;

    Ok(AppStore {
        store,
        trigger,
        hydrated: was_hydrated,
    })
}
