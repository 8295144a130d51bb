//! Writing live state back to storage.
//!
//! [`PersistenceTrigger`] observes a store and hands the latest state to a
//! [`PersistenceMedium`] through a [`Throttle`].

mod file;
mod medium;
mod throttle;
mod trigger;

pub use file::JsonFileMedium;
pub use medium::{MemoryMedium, PersistenceMedium};
pub use throttle::{Throttle, ThrottleConfig, ThrottleHandle};
pub use trigger::PersistenceTrigger;
