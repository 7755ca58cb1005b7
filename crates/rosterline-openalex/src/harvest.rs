//! Per-institution author harvest
//!
//! The composed flow: works pages filtered by institution → authorship
//! extraction → dedup against the run's seen set → fail-soft enrichment
//! (profile + publication ids) → bounded accumulation. Persistence happens
//! afterwards, in one batch, not here.

use rosterline_core::SeenIds;

use crate::config::ApiConfig;
use crate::enrich::{fetch_author, fetch_author_works};
use crate::page::Pages;
use crate::record::{AuthorRecord, InstitutionRow, WorkRow};

/// An enriched author tied to the institution it was discovered under
#[derive(Debug)]
pub struct HarvestedAuthor {
    pub author: AuthorRecord,
    /// Work ids from the author's own works listing
    pub publications: Vec<String>,
    /// Denormalized back-reference to the discovering institution
    pub institution_id: String,
}

/// Counters from one institution's harvest
#[derive(Debug)]
pub struct HarvestStats {
    pub pages: usize,
    pub works: usize,
    pub authors: usize,
}

impl HarvestStats {
    pub fn log(&self, institution_id: &str) {
        log::info!(
            "{institution_id}: {} authors from {} works over {} pages",
            self.authors,
            self.works,
            self.pages
        );
    }
}

/// Harvest up to `cap` authors discovered under one institution.
///
/// `seen` belongs to the caller and spans the whole run: an author already
/// harvested under an earlier institution is skipped here without any
/// network traffic, so the first-seen association wins. Authors whose
/// enrichment fails are logged and skipped (and stay marked seen — there
/// is no retry policy). Order of the result is first-encountered order.
pub fn harvest_institution_authors(
    cfg: &ApiConfig,
    institution_id: &str,
    cap: usize,
    seen: &mut SeenIds,
) -> (Vec<HarvestedAuthor>, HarvestStats) {
    let mut pages = Pages::<WorkRow>::new(cfg.works_for_institution_url(institution_id), None);
    let mut authors: Vec<HarvestedAuthor> = Vec::new();
    let mut works = 0usize;

    while authors.len() < cap {
        let Some(batch) = pages.next() else { break };
        works += batch.len();
        for work in batch {
            for authorship in work.authorships {
                if authors.len() >= cap {
                    break;
                }
                let id = authorship.author.id;
                if id.is_empty() || !seen.insert(&id) {
                    continue;
                }
                let Some(author) = fetch_author(cfg, &id) else {
                    continue;
                };
                let publications = fetch_author_works(cfg, &id);
                authors.push(HarvestedAuthor {
                    author,
                    publications,
                    institution_id: institution_id.to_string(),
                });
            }
        }
    }

    let stats = HarvestStats {
        pages: pages.pages_fetched(),
        works,
        authors: authors.len(),
    };
    (authors, stats)
}

/// Search institutions by name, up to `max` results.
pub fn search_institutions(
    cfg: &ApiConfig,
    query: &str,
    max: Option<usize>,
) -> Vec<InstitutionRow> {
    let pages = Pages::<InstitutionRow>::new(cfg.institutions_search_url(query), max);
    let institutions: Vec<InstitutionRow> = pages.flatten().collect();
    log::info!("search '{query}': {} institutions", institutions.len());
    institutions
}
