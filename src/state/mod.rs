//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `courses`) so each store owns its own
//! fields and reducer. Reducers are pure: they take the current state and a
//! tagged action and never perform I/O. `lessons` and `dashboard` hold pure
//! view-model helpers with no state of their own.

pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod lessons;
pub mod lifecycle;
