//! Database layer - stores, sessions, schema and seed data
//!
//! # Design Principles
//!
//! - Connection pool, no global session state
//! - One transaction per request, rolled back unless committed
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod memory;
pub mod postgres;
pub mod schema;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::{PgStore, DEFAULT_MAX_CONNECTIONS};
pub use seed::{seed, SeedReport};
pub use store::{DataStore, DbError, Session};
