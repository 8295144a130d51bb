//! Rebuilding live state from a persisted snapshot.

mod hydrate;
mod presence;

pub use hydrate::{hydrate, hydrate_with_defaults};
pub use presence::{PresencePolicy, Truthy};
