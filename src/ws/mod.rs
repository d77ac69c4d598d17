//! WebSocket layer: live snapshot feed and tool calls over one socket.
//!
//! The endpoint at `/ws` pushes the current state on connect, then every
//! snapshot published on the event bus.

pub mod connection;
pub mod handler;
pub mod messages;
