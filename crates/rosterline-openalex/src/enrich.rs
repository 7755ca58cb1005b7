//! Fail-soft single-resource enrichment
//!
//! Every fetch here can fail without consequence for the surrounding
//! loop: a bad status or body is logged and yields an absent record.

use rustc_hash::FxHashMap;

use rosterline_core::get_text;

use crate::config::ApiConfig;
use crate::page::Pages;
use crate::record::{short_id, AuthorRecord, PublicationRow, WorkRow};

/// Fetch one author's full profile. None on any error.
pub fn fetch_author(cfg: &ApiConfig, author_id: &str) -> Option<AuthorRecord> {
    let url = cfg.author_url(author_id);
    let body = match get_text(&url) {
        Ok(body) => body,
        Err(e) => {
            log::warn!("author {}: skipped: {e}", short_id(author_id));
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("author {}: invalid JSON: {e}", short_id(author_id));
            None
        }
    }
}

/// List an author's work ids across all pages.
///
/// A failed page logs and ends the listing early; whatever was collected
/// so far is returned rather than discarded.
pub fn fetch_author_works(cfg: &ApiConfig, author_id: &str) -> Vec<String> {
    let pages = Pages::<WorkRow>::new(cfg.works_for_author_url(author_id), None);
    pages.flatten().map(|work| work.id).collect()
}

/// Title and abstract of one publication
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub title: String,
    pub abstract_text: String,
}

/// Fetch one work's title and abstract. None on error, and also when
/// either field is missing — the title→abstract map wants complete pairs.
pub fn fetch_publication(cfg: &ApiConfig, work_id: &str) -> Option<Publication> {
    let url = cfg.work_url(work_id);
    let body = match get_text(&url) {
        Ok(body) => body,
        Err(e) => {
            log::warn!("work {}: skipped: {e}", short_id(work_id));
            return None;
        }
    };
    let row: PublicationRow = match serde_json::from_str(&body) {
        Ok(row) => row,
        Err(e) => {
            log::warn!("work {}: invalid JSON: {e}", short_id(work_id));
            return None;
        }
    };
    let title = row.best_title()?.to_string();
    let abstract_text = row.abstract_text()?;
    Some(Publication {
        title,
        abstract_text,
    })
}

/// Per-run publication cache keyed by work id.
///
/// Authors share publications and duplicate institution listings repeat
/// authors, so each work is fetched at most once per run. Failures are
/// cached too: a work that produced no record is not re-requested.
#[derive(Debug, Default)]
pub struct PublicationCache {
    map: FxHashMap<String, Option<Publication>>,
}

impl PublicationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a work, fetching on first request.
    pub fn get(&mut self, cfg: &ApiConfig, work_id: &str) -> Option<&Publication> {
        self.map
            .entry(work_id.to_string())
            .or_insert_with(|| fetch_publication(cfg, work_id))
            .as_ref()
    }

    /// Distinct works requested so far (hits and misses)
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterline_core::SHARED_RUNTIME;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn start_server() -> MockServer {
        SHARED_RUNTIME.handle().block_on(MockServer::start())
    }

    fn mount(server: &MockServer, mock: Mock) {
        SHARED_RUNTIME.handle().block_on(mock.mount(server));
    }

    fn test_config(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn fetch_author_parses_profile() {
        let server = start_server();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/authors/A1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "id": "https://openalex.org/A1",
                    "display_name": "Ada Lovelace",
                    "works_count": 3
                }))),
        );

        let author = fetch_author(&test_config(&server), "https://openalex.org/A1").unwrap();
        assert_eq!(author.display_name, "Ada Lovelace");
        assert_eq!(author.works_count, 3);
    }

    #[test]
    fn fetch_author_error_is_none() {
        let server = start_server();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/authors/A404"))
                .respond_with(ResponseTemplate::new(404).set_body_string("gone")),
        );

        assert!(fetch_author(&test_config(&server), "A404").is_none());
    }

    #[test]
    fn fetch_author_bad_body_is_none() {
        let server = start_server();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/authors/A1"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>")),
        );

        assert!(fetch_author(&test_config(&server), "A1").is_none());
    }

    #[test]
    fn fetch_publication_requires_title_and_abstract() {
        let server = start_server();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/works/W1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "id": "https://openalex.org/W1",
                    "title": "Untitled study"
                }))),
        );

        // No abstract — no pair
        assert!(fetch_publication(&test_config(&server), "W1").is_none());
    }

    #[test]
    fn publication_cache_fetches_once() {
        let server = start_server();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/works/W1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "id": "https://openalex.org/W1",
                    "title": "Cached",
                    "abstract_inverted_index": {"Text": [0]}
                }))),
        );

        let cfg = test_config(&server);
        let mut cache = PublicationCache::new();
        let first = cache.get(&cfg, "W1").cloned();
        let second = cache.get(&cfg, "W1").cloned();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        let requests = SHARED_RUNTIME
            .handle()
            .block_on(server.received_requests())
            .unwrap_or_default();
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn publication_cache_remembers_failures() {
        let server = start_server();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/works/W9"))
                .respond_with(ResponseTemplate::new(500).set_body_string("err")),
        );

        let cfg = test_config(&server);
        let mut cache = PublicationCache::new();
        assert!(cache.get(&cfg, "W9").is_none());
        assert!(cache.get(&cfg, "W9").is_none());

        let requests = SHARED_RUNTIME
            .handle()
            .block_on(server.received_requests())
            .unwrap_or_default();
        assert_eq!(requests.len(), 1);
    }
}
