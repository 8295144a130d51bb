use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Result, StoreError};

/// Coalescing policy for a [`Throttle`].
///
/// The action runs at most once per `interval`. With `leading`, the first value
/// offered while idle runs immediately. With `trailing`, values offered during a
/// window are collapsed into one run at the window's end using the latest value.
/// Both edges are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    #[serde(rename = "interval_ms", with = "duration_ms")]
    pub interval: Duration,
    pub leading: bool,
    pub trailing: bool,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            leading: true,
            trailing: true,
        }
    }
}

impl ThrottleConfig {
    /// Leading and trailing throttle with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(StoreError::invalid_throttle("interval must be non-zero"));
        }
        if !self.leading && !self.trailing {
            return Err(StoreError::invalid_throttle(
                "at least one of leading or trailing must be enabled",
            ));
        }
        Ok(())
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

struct Slot<T> {
    pending: Option<T>,
    /// End of the current rate-limit window; `None` while idle.
    window_end: Option<Instant>,
    /// Flushes asked for and flushes served; a flush waits for its own ticket.
    flush_requests: u64,
    flushes_done: u64,
    shutdown: bool,
    runs: u64,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    cvar: Condvar,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, Slot<T>>) -> MutexGuard<'a, Slot<T>> {
        self.cvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_timeout<'a>(
        &self,
        guard: MutexGuard<'a, Slot<T>>,
        timeout: Duration,
    ) -> MutexGuard<'a, Slot<T>> {
        match self.cvar.wait_timeout(guard, timeout) {
            Ok((guard, _)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }
}

/// Runs an action on a worker thread, at most once per interval, with the most
/// recent value offered.
///
/// Dropping the throttle (or calling [`Throttle::dispose`]) runs any pending value
/// and joins the worker.
pub struct Throttle<T> {
    shared: Arc<Shared<T>>,
    config: ThrottleConfig,
    worker: Option<JoinHandle<()>>,
}

/// Cloneable sender half of a [`Throttle`].
pub struct ThrottleHandle<T> {
    shared: Arc<Shared<T>>,
    config: ThrottleConfig,
}

impl<T> Clone for ThrottleHandle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            config: self.config,
        }
    }
}

impl<T> ThrottleHandle<T> {
    /// Offer a value. It replaces any value still waiting for the window to close.
    pub fn call(&self, value: T) {
        let mut slot = self.shared.lock();
        if slot.shutdown {
            return;
        }
        if !self.config.trailing && slot.window_end.is_some_and(|end| Instant::now() < end) {
            return;
        }
        slot.pending = Some(value);
        self.shared.cvar.notify_all();
    }
}

impl<T: Send + 'static> Throttle<T> {
    /// Spawn the worker thread that runs `action`.
    pub fn new<F>(config: ThrottleConfig, action: F) -> Result<Self>
    where
        F: Fn(T) + Send + 'static,
    {
        config.validate()?;

        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                pending: None,
                window_end: None,
                flush_requests: 0,
                flushes_done: 0,
                shutdown: false,
                runs: 0,
            }),
            cvar: Condvar::new(),
        });

        let worker = thread::Builder::new()
            .name("playground-store-throttle".to_owned())
            .spawn({
                let shared = Arc::clone(&shared);
                move || run_worker(shared, config, action)
            })?;

        Ok(Self {
            shared,
            config,
            worker: Some(worker),
        })
    }
}

impl<T> Throttle<T> {
    pub fn config(&self) -> ThrottleConfig {
        self.config
    }

    pub fn handle(&self) -> ThrottleHandle<T> {
        ThrottleHandle {
            shared: Arc::clone(&self.shared),
            config: self.config,
        }
    }

    /// Offer a value; see [`ThrottleHandle::call`].
    pub fn call(&self, value: T) {
        self.handle().call(value);
    }

    /// How many times the action has completed.
    pub fn runs(&self) -> u64 {
        self.shared.lock().runs
    }

    /// Run any pending value now, bypassing the window, and wait for it to finish.
    ///
    /// Waits for the value pending at the time of the call (or a newer one), not
    /// for values offered afterwards.
    pub fn flush(&self) {
        let mut slot = self.shared.lock();
        if slot.shutdown || self.worker.is_none() {
            return;
        }
        slot.flush_requests += 1;
        let ticket = slot.flush_requests;
        self.shared.cvar.notify_all();
        while slot.flushes_done < ticket {
            slot = self.shared.wait(slot);
        }
    }

    /// Stop accepting values, run anything pending, and join the worker.
    pub fn dispose(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        {
            let mut slot = self.shared.lock();
            slot.shutdown = true;
            self.shared.cvar.notify_all();
        }
        if worker.join().is_err() {
            log::error!("throttle worker panicked");
        }
    }
}

impl<T> Drop for Throttle<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker<T, F>(shared: Arc<Shared<T>>, config: ThrottleConfig, action: F)
where
    F: Fn(T),
{
    let mut slot = shared.lock();
    loop {
        let now = Instant::now();
        let flush_target = slot.flush_requests;
        let forced = slot.shutdown || slot.flushes_done < flush_target;
        if !forced {
            let window_end = slot.window_end;
            match window_end {
                Some(end) if now < end => {
                    slot = shared.wait_timeout(slot, end - now);
                    continue;
                }
                Some(_) => {
                    // Window closed: trailing edge.
                    slot.window_end = None;
                    if slot.pending.is_none() {
                        continue;
                    }
                }
                None if slot.pending.is_none() => {
                    slot = shared.wait(slot);
                    continue;
                }
                None if config.leading => {}
                None => {
                    slot.window_end = Some(now + config.interval);
                    continue;
                }
            }
        }

        if let Some(value) = slot.pending.take() {
            slot.window_end = Some(now + config.interval);
            drop(slot);

            if catch_unwind(AssertUnwindSafe(|| action(value))).is_err() {
                log::error!("throttled action panicked");
            }

            slot = shared.lock();
            slot.runs += 1;
        }

        if forced {
            slot.flushes_done = slot.flushes_done.max(flush_target);
        }
        shared.cvar.notify_all();
        if slot.shutdown && slot.pending.is_none() {
            break;
        }
    }
}
