//! OpenAlex API configuration and endpoint URL construction

use serde::Deserialize;

use crate::record::short_id;

/// Contact address sent as the `mailto` parameter on collection requests,
/// per OpenAlex's polite-pool etiquette. Not validated by the API.
pub const DEFAULT_MAILTO: &str = "contact@rosterline.org";

/// Default page size for collection endpoints
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Page size for an author's works listing (id-only pages, so the
/// maximum the API allows)
const WORKS_PER_PAGE: u32 = 200;

/// OpenAlex API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub mailto: String,
    pub per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openalex.org".to_string(),
            mailto: DEFAULT_MAILTO.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Percent-encoded query string from key/value pairs. Values are caller
/// input (search terms, full URL ids) and must survive `&`, `=`, `#`.
fn query_string(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

impl ApiConfig {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Works collection filtered by institution
    pub fn works_for_institution_url(&self, institution_id: &str) -> String {
        let query = query_string(&[
            ("filter", &format!("institutions.id:{institution_id}")),
            ("per_page", &self.per_page.to_string()),
            ("mailto", &self.mailto),
        ]);
        format!("{}/works?{query}", self.base())
    }

    /// Works collection filtered by author (id listing, large pages)
    pub fn works_for_author_url(&self, author_id: &str) -> String {
        let query = query_string(&[
            ("filter", &format!("authorships.author.id:{}", short_id(author_id))),
            ("per_page", &WORKS_PER_PAGE.to_string()),
            ("mailto", &self.mailto),
        ]);
        format!("{}/works?{query}", self.base())
    }

    /// Institutions collection, full-text search
    pub fn institutions_search_url(&self, query: &str) -> String {
        let query = query_string(&[
            ("search", query),
            ("per_page", &self.per_page.to_string()),
            ("mailto", &self.mailto),
        ]);
        format!("{}/institutions?{query}", self.base())
    }

    /// Single-resource author endpoint (trailing path segment of the id)
    pub fn author_url(&self, author_id: &str) -> String {
        format!("{}/authors/{}", self.base(), short_id(author_id))
    }

    /// Single-resource work endpoint
    pub fn work_url(&self, work_id: &str) -> String {
        format!("{}/works/{}", self.base(), short_id(work_id))
    }
}
