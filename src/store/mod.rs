//! State container with commit notifications.
//!
//! Stores hold a single state value, apply transitions one at a time, and notify
//! subscribers after each commit.

mod store;
mod subscription;

pub use store::Store;
pub use subscription::Subscription;

/// A state type that knows how to apply actions of type `A`.
pub trait Reduce<A> {
    fn reduce(&mut self, action: A);
}
