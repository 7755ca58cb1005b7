//! Rosterline Core - Common infrastructure for OpenAlex harvesting
//!
//! This crate provides the pieces shared by the API and storage layers:
//! a blocking HTTP facade over a shared async client, the common error
//! type, logging setup, and the seen-identifier set used to deduplicate
//! authors across pages and institutions.

pub mod error;
pub mod http;
pub mod logging;
pub mod seen;

// Re-exports for convenience
pub use error::ApiError;
pub use http::{get_text, http_client, SHARED_RUNTIME};
pub use logging::init_logging;
pub use seen::SeenIds;
