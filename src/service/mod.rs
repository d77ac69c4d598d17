//! Service layer: session operations and process lifecycle.
//!
//! [`ProverbService`] implements `get`, `add`, and `set` over the session
//! state and mirrors mutations through a
//! [`crate::persistence::ProverbStore`]. [`Lifecycle`] brings storage up
//! and down around it.

pub mod lifecycle;
pub mod proverb_service;

pub use lifecycle::{Lifecycle, PersistenceStatus, StartupReport};
pub use proverb_service::ProverbService;
