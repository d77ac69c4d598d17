//! Domain layer: session state, snapshot events, and the event bus.

pub mod event_bus;
pub mod snapshot;
pub mod state;

pub use event_bus::EventBus;
pub use snapshot::{EventType, StateSnapshotEvent};
pub use state::{ProverbsState, SessionState};
