//! Typed rows for OpenAlex JSON responses
//!
//! Every field defaults: OpenAlex omits keys freely and a missing field
//! must never fail a whole page.

use serde::Deserialize;
use serde_json::Value;

/// Trailing path segment of an OpenAlex URL id ("https://openalex.org/A5"
/// → "A5"). Already-short ids pass through unchanged.
pub fn short_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// One page of a collection endpoint response
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    // Named default fn: a bare `#[serde(default)]` would put a
    // `T: Default` bound on the Deserialize impl, and row types are
    // deliberately not Default.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub meta: Meta,
}

/// Collection response metadata; absence of `next_page_url` ends pagination
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// A work as listed on the works collection endpoint
#[derive(Debug, Deserialize)]
pub struct WorkRow {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub authorships: Vec<Authorship>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Authorship {
    #[serde(default)]
    pub author: AuthorRef,
}

/// Bare author reference embedded in a work's authorship list
#[derive(Debug, Default, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,
}

/// An institution as returned by the institutions collection endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionRow {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub ror: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,
}

/// Full author profile from the single-resource authors endpoint
#[derive(Debug, Deserialize)]
pub struct AuthorRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub orcid: Option<String>,

    #[serde(default)]
    pub works_count: i64,

    #[serde(default)]
    pub cited_by_count: i64,

    /// Year-keyed works/citations counts, stored verbatim as JSON
    #[serde(default)]
    pub counts_by_year: Value,

    #[serde(default)]
    pub works_api_url: Option<String>,

    #[serde(default)]
    pub cited_by_api_url: Option<String>,

    /// Affiliation history, stored verbatim as JSON
    #[serde(default)]
    pub affiliations: Value,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

/// Citation-impact stats; h-index and i10-index live here, not at the
/// top level of the author record
#[derive(Debug, Default, Deserialize)]
pub struct SummaryStats {
    #[serde(default)]
    pub h_index: Option<i64>,
    #[serde(default)]
    pub i10_index: Option<i64>,
}

impl AuthorRecord {
    pub fn h_index(&self) -> Option<i64> {
        self.summary_stats.as_ref().and_then(|s| s.h_index)
    }

    pub fn i10_index(&self) -> Option<i64> {
        self.summary_stats.as_ref().and_then(|s| s.i10_index)
    }
}

/// A work from the single-resource works endpoint, as needed for the
/// title→abstract mapping
#[derive(Debug, Deserialize)]
pub struct PublicationRow {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Plain abstract; rarely present (OpenAlex ships the inverted index)
    #[serde(rename = "abstract", default)]
    pub abstract_plain: Option<String>,

    #[serde(default)]
    pub abstract_inverted_index: Option<Value>,
}

impl PublicationRow {
    /// Best available title (works endpoint duplicates it as display_name)
    pub fn best_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.display_name.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// Abstract text: the plain field when present, otherwise the decoded
    /// inverted index. None if neither yields text.
    pub fn abstract_text(&self) -> Option<String> {
        if let Some(text) = self.abstract_plain.as_ref().filter(|t| !t.is_empty()) {
            return Some(text.clone());
        }
        let index = self.abstract_inverted_index.as_ref()?.as_object()?;
        let text = decode_inverted_index(index);
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Reconstruct abstract text from OpenAlex's word→positions inverted index.
///
/// `{"Hello": [0], "world": [1]}` → `"Hello world"`. Words are placed by
/// position and joined with single spaces; original whitespace is lost,
/// which is fine for an embedding/display corpus.
pub fn decode_inverted_index(index: &serde_json::Map<String, Value>) -> String {
    let mut placed: Vec<(u64, &str)> = Vec::new();
    for (word, positions) in index {
        let Some(positions) = positions.as_array() else {
            continue;
        };
        for pos in positions.iter().filter_map(Value::as_u64) {
            placed.push((pos, word.as_str()));
        }
    }
    placed.sort_unstable_by_key(|&(pos, _)| pos);

    let mut text = String::new();
    for (i, (_, word)) in placed.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}
