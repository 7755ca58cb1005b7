//! OpenAlex API layer for rosterline
//!
//! Typed rows for the OpenAlex REST responses, a cursor-following page
//! iterator, fail-soft single-resource enrichment, and the composed
//! per-institution author harvest.

pub mod config;
pub mod enrich;
pub mod harvest;
pub mod page;
pub mod record;

// Re-exports for convenience
pub use config::ApiConfig;
pub use enrich::{fetch_author, fetch_author_works, Publication, PublicationCache};
pub use harvest::{harvest_institution_authors, search_institutions, HarvestStats, HarvestedAuthor};
pub use page::Pages;
pub use record::{short_id, AuthorRecord, InstitutionRow, WorkRow};
