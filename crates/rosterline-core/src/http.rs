//! Blocking HTTP facade over a shared async client.
//!
//! Uses async reqwest on a shared tokio runtime internally, but presents
//! a synchronous interface: the harvest flow is single-threaded blocking
//! I/O with no overlap between requests.

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::ApiError;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(2)
        .user_agent(concat!("rosterline/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Blocking GET returning the response body as text.
///
/// A non-success status is an error carrying both the status code and the
/// body text, so callers can log both before halting or skipping.
pub fn get_text(url: &str) -> Result<String, ApiError> {
    SHARED_RUNTIME.handle().block_on(async {
        let resp = http_client()
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: Some(status.as_u16()),
                body,
            });
        }
        Ok(body)
    })
}
