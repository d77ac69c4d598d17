//! # proverbs-agent
//!
//! Backend for a conversational assistant that manages a list of proverbs
//! for one session. A language model decides when to call the tools; this
//! crate owns the session state those tools act on, mirrors it to
//! PostgreSQL on a best-effort basis, and streams state snapshots to
//! clients.
//!
//! ## Architecture
//!
//! ```text
//! Conversational runtime / clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── Tool surface (tools/)
//!     ├── ProverbService + Lifecycle (service/)
//!     ├── SessionState + EventBus (domain/)
//!     │
//!     └── ProverbRepository → ConnectionManager → PostgreSQL (persistence/)
//! ```
//!
//! In-memory state is authoritative. The `proverbs` table is rewritten
//! from it after every mutation and read back only once, at startup.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod tools;
pub mod ws;
