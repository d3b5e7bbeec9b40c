//! Request lifecycle shared by every async store operation.
//!
//! Each operation dispatches `Pending` before its network call and exactly
//! one of `Fulfilled`/`Rejected` after it. Operations whose responses can
//! race carry a [`RequestTicket`]; a store only applies the outcome of the
//! latest ticket it has seen.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

/// Phase of one async request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    /// Display string for the failure.
    Rejected(String),
}

impl<T> Lifecycle<T> {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Monotonic identifier for a racing request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// The ticket issued after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
