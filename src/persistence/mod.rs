//! Persistence layer: PostgreSQL mirror of the session's proverbs.
//!
//! The database is a derived copy of in-memory state. [`ConnectionManager`]
//! owns the lazily built `sqlx::PgPool`, [`schema`] creates the single
//! `proverbs` table, and [`ProverbRepository`] is the only component that
//! issues SQL against it. Callers see storage through the [`ProverbStore`]
//! trait, whose methods never return storage errors.

pub mod models;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use models::ProverbRow;
pub use pool::{ConnectionManager, DbConnection};
pub use postgres::ProverbRepository;
pub use store::{PersistOutcome, ProverbStore};
