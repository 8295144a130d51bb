use std::sync::Arc;

use super::{PersistenceMedium, Throttle, ThrottleConfig};
use crate::error::Result;
use crate::state::AppState;
use crate::store::{Store, Subscription};

/// Saves the live state to a [`PersistenceMedium`] after commits, throttled.
///
/// Every commit offers the committed state to a [`Throttle`]; the throttle's
/// worker writes the most recent one at most once per interval. Save failures are
/// logged and dropped. The trigger only reads state.
///
/// Disposing (or dropping) the trigger unsubscribes from the store, writes any
/// pending state, and stops the worker.
pub struct PersistenceTrigger {
    subscription: Option<Subscription>,
    throttle: Option<Throttle<AppState>>,
}

impl PersistenceTrigger {
    /// Register on `store` and start the save worker.
    pub fn attach(
        store: &Store<AppState>,
        medium: Arc<dyn PersistenceMedium>,
        config: ThrottleConfig,
    ) -> Result<Self> {
        let throttle = Throttle::new(config, move |state: AppState| {
            match medium.save(&state) {
                Ok(()) => log::debug!("persisted application state"),
                Err(err) => log::error!("failed to persist application state: {err}"),
            }
        })?;

        let handle = throttle.handle();
        let subscription = store.subscribe(move |state: &AppState| handle.call(state.clone()));

        log::info!(
            "persistence attached (interval {:?}, leading {}, trailing {})",
            config.interval,
            config.leading,
            config.trailing
        );

        Ok(Self {
            subscription: Some(subscription),
            throttle: Some(throttle),
        })
    }

    pub fn config(&self) -> Option<ThrottleConfig> {
        self.throttle.as_ref().map(Throttle::config)
    }

    /// Number of saves attempted so far.
    pub fn saves(&self) -> u64 {
        self.throttle.as_ref().map_or(0, Throttle::runs)
    }

    /// Write any pending state now and wait for it.
    pub fn flush(&self) {
        if let Some(throttle) = &self.throttle {
            throttle.flush();
        }
    }

    /// Stop observing the store. Pending state is still written.
    pub fn dispose(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.dispose();
        }
        if let Some(throttle) = self.throttle.take() {
            throttle.dispose();
            log::info!("persistence detached");
        }
    }
}

impl Drop for PersistenceTrigger {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryMedium;
    use crate::state::{Action, Chapter, Variant};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn burst_of_commits_saves_last_state_once() {
        let store = Store::new(AppState::default());
        let medium = Arc::new(MemoryMedium::new());
        let trigger = PersistenceTrigger::attach(
            &store,
            medium.clone(),
            ThrottleConfig::new(Duration::from_millis(100)),
        )
        .unwrap();

        store.dispatch(Action::ChangeChapter(Chapter::SOURCE_2));
        let first = store.get();
        thread::sleep(Duration::from_millis(30));

        store.dispatch(Action::ChangeChapter(Chapter::SOURCE_3));
        store.dispatch(Action::ChangeVariant(Variant::Lazy));
        store.dispatch(Action::SetFolderMode(true));
        let last = store.get();
        thread::sleep(Duration::from_millis(400));

        assert_eq!(medium.saves(), vec![first, last]);
        assert_eq!(trigger.saves(), 2);
    }

    #[test]
    fn first_change_from_idle_saves_at_once() {
        let store = Store::new(AppState::default());
        let medium = Arc::new(MemoryMedium::new());
        let _trigger =
            PersistenceTrigger::attach(&store, medium.clone(), ThrottleConfig::default()).unwrap();

        store.dispatch(Action::ChangeChapter(Chapter::SOURCE_2));
        thread::sleep(Duration::from_millis(200));

        assert_eq!(medium.save_count(), 1);
        assert_eq!(medium.saves()[0], store.get());
    }

    #[test]
    fn no_commits_no_saves() {
        let store = Store::new(AppState::default());
        let medium = Arc::new(MemoryMedium::new());
        let trigger = PersistenceTrigger::attach(
            &store,
            medium.clone(),
            ThrottleConfig::new(Duration::from_millis(10)),
        )
        .unwrap();

        thread::sleep(Duration::from_millis(50));
        trigger.dispose();
        assert_eq!(medium.save_count(), 0);
    }

    #[test]
    fn dispose_writes_pending_state_and_unsubscribes() {
        let store = Store::new(AppState::default());
        let medium = Arc::new(MemoryMedium::new());
        let trigger = PersistenceTrigger::attach(
            &store,
            medium.clone(),
            ThrottleConfig::new(Duration::from_secs(60)),
        )
        .unwrap();

        store.dispatch(Action::SetAutorun(true));
        trigger.dispose();
        assert_eq!(medium.save_count(), 1);
        assert_eq!(store.subscriber_count(), 0);

        store.dispatch(Action::SetAutorun(false));
        assert_eq!(medium.save_count(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let store = Store::new(AppState::default());
        let config = ThrottleConfig::default()
            .with_leading(false)
            .with_trailing(false);
        let result = PersistenceTrigger::attach(&store, Arc::new(MemoryMedium::new()), config);
        assert!(result.is_err());
        assert_eq!(store.subscriber_count(), 0);
    }
}
