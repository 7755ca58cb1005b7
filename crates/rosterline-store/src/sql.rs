//! SQL statement text for the rosterline tables
//!
//! Tables are pre-created; only DML lives here. Inserts target the
//! `openalex_id` unique column and no-op on conflict — the existing row
//! wins, there is no merge.

/// Insert one institution, skipping rows whose openalex_id exists.
pub const INSERT_INSTITUTION: &str = "\
    INSERT INTO institutions \
        (display_name, openalex_id, ror_id, country_code, created_at) \
    VALUES ($1, $2, $3, $4, NOW()) \
    ON CONFLICT (openalex_id) DO NOTHING";

/// Insert one author, skipping rows whose openalex_id exists.
pub const INSERT_AUTHOR: &str = "\
    INSERT INTO authors \
        (openalex_id, display_name, orcid, works_count, cited_by_count, \
         counts_by_year, works_api_url, cited_by_api_url, affiliations, \
         h_index, i10_index, publications, updated_date, \
         institution_openalex_id) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
    ON CONFLICT (openalex_id) DO NOTHING";

/// Institution ids in store listing order; drives the authors stage.
pub const SELECT_INSTITUTION_IDS: &str = "SELECT openalex_id FROM institutions";

/// Author ids with their stored publication lists; drives the
/// publications stage.
pub const SELECT_AUTHOR_PUBLICATIONS: &str = "SELECT openalex_id, publications FROM authors";

pub const DELETE_INSTITUTIONS: &str = "DELETE FROM institutions";

pub const DELETE_AUTHORS: &str = "DELETE FROM authors";
