//! PostgreSQL persistence for rosterline
//!
//! One blocking connection per run, one transaction per batch, and
//! conflict-skip inserts: a row whose unique identifier already exists
//! is left untouched.

pub mod config;
pub mod sql;
pub mod store;

pub use config::DbConfig;
pub use store::Store;
