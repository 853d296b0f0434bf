//! storefront-server: product and category CRUD over HTTP
//!
//! Maps JSON requests onto rows held by a [`db::DataStore`] and
//! serializes the committed rows back out.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DataStore, DbError, MemoryStore, PgStore, Session};
pub use http::{router, run_server, ApiError, AppState, ServerConfig};
