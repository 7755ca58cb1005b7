//! Cursor-following page iterator for collection endpoints

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use rosterline_core::{get_text, ApiError};

use crate::record::Page;

/// Lazy iterator over page-result batches from a collection endpoint.
///
/// The first request uses the supplied URL (filter, page size, mailto
/// already embedded); every later request follows the server's
/// `meta.next_page_url` verbatim. Iteration ends when the server stops
/// returning a next-page URL, on the first non-success response (status
/// and body are logged, no retry), or once `max_items` results have been
/// yielded — the final batch is truncated to fit the cap.
///
/// Not restartable: the cursor lives only in this value.
#[derive(Debug)]
pub struct Pages<T> {
    next_url: Option<String>,
    max_items: Option<usize>,
    items: usize,
    pages: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Pages<T> {
    pub fn new(first_url: String, max_items: Option<usize>) -> Self {
        Self {
            next_url: Some(first_url),
            max_items,
            items: 0,
            pages: 0,
            _marker: PhantomData,
        }
    }

    /// Pages successfully fetched and parsed so far. A request that
    /// fails (and halts iteration) is not counted.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Items yielded so far (after cap truncation)
    pub fn items_fetched(&self) -> usize {
        self.items
    }

    fn fetch(&self, url: &str) -> Result<Page<T>, ApiError> {
        let body = get_text(url)?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(url, &e))
    }
}

impl<T: DeserializeOwned> Iterator for Pages<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if let Some(max) = self.max_items {
            if self.items >= max {
                return None;
            }
        }
        let url = self.next_url.take()?;

        let page = match self.fetch(&url) {
            Ok(page) => page,
            Err(e) => {
                log::error!("page fetch halted: {e}");
                return None;
            }
        };
        self.pages += 1;
        self.next_url = page.meta.next_page_url;

        let mut batch = page.results;
        if let Some(max) = self.max_items {
            let remaining = max - self.items;
            if batch.len() > remaining {
                batch.truncate(remaining);
            }
        }
        self.items += batch.len();
        log::debug!(
            "page {}: {} results (total {})",
            self.pages,
            batch.len(),
            self.items
        );
        Some(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterline_core::SHARED_RUNTIME;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, serde::Deserialize)]
    struct Item {
        id: String,
    }

    fn start_server() -> MockServer {
        SHARED_RUNTIME.handle().block_on(MockServer::start())
    }

    fn mount(server: &MockServer, mock: Mock) {
        SHARED_RUNTIME.handle().block_on(mock.mount(server));
    }

    fn page_body(ids: &[&str], next: Option<String>) -> serde_json::Value {
        let results: Vec<_> = ids.iter().map(|id| json!({"id": id})).collect();
        match next {
            Some(url) => json!({"results": results, "meta": {"next_page_url": url}}),
            None => json!({"results": results, "meta": {}}),
        }
    }

    /// Three pages; the third has no next URL. All items, in order.
    #[test]
    fn terminates_when_next_url_absent() {
        let server = start_server();
        let base = server.uri();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                    &["a", "b"],
                    Some(format!("{base}/items?page=2")),
                ))),
        );
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                    &["c"],
                    Some(format!("{base}/items?page=3")),
                ))),
        );
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "3"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(page_body(&["d"], None)),
                ),
        );

        let mut pages = Pages::<Item>::new(format!("{base}/items?page=1"), None);
        let ids: Vec<String> = pages
            .by_ref()
            .flatten()
            .map(|item| item.id)
            .collect();

        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(pages.pages_fetched(), 3);
        assert_eq!(pages.items_fetched(), 4);
    }

    /// Cap of 3 over pages of 2: second batch truncated, no third request.
    #[test]
    fn cap_truncates_and_stops() {
        let server = start_server();
        let base = server.uri();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                    &["a", "b"],
                    Some(format!("{base}/items?page=2")),
                ))),
        );
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                    &["c", "d"],
                    Some(format!("{base}/items?page=3")),
                ))),
        );

        let mut pages = Pages::<Item>::new(format!("{base}/items?page=1"), Some(3));
        let ids: Vec<String> = pages.by_ref().flatten().map(|item| item.id).collect();

        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(pages.pages_fetched(), 2);
        assert_eq!(pages.items_fetched(), 3);
    }

    /// Non-success response halts iteration; prior batches are kept.
    #[test]
    fn http_error_halts_without_panicking() {
        let server = start_server();
        let base = server.uri();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                    &["a"],
                    Some(format!("{base}/items?page=2")),
                ))),
        );
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .and(query_param("page", "2"))
                .respond_with(ResponseTemplate::new(500).set_body_string("server error")),
        );

        let mut pages = Pages::<Item>::new(format!("{base}/items?page=1"), None);
        let ids: Vec<String> = pages.by_ref().flatten().map(|item| item.id).collect();

        assert_eq!(ids, ["a"]);
        assert_eq!(pages.pages_fetched(), 1);
    }

    /// Unparsable body is a halt, not a panic.
    #[test]
    fn malformed_body_halts() {
        let server = start_server();
        let base = server.uri();
        mount(
            &server,
            Mock::given(method("GET"))
                .and(path("/items"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
        );

        let mut pages = Pages::<Item>::new(format!("{base}/items"), None);
        assert!(pages.next().is_none());
        assert_eq!(pages.pages_fetched(), 0);
    }

    /// Cap of zero performs no requests at all.
    #[test]
    fn zero_cap_fetches_nothing() {
        let mut pages = Pages::<Item>::new("http://127.0.0.1:9/items".to_string(), Some(0));
        assert!(pages.next().is_none());
        assert_eq!(pages.pages_fetched(), 0);
    }
}
