//! Common error type for API operations

/// Error from a single API request (transport, status, or decode).
///
/// `Http` keeps the response body so callers can log status and body
/// together before skipping a record or halting a page loop.
#[derive(Debug)]
pub enum ApiError {
    /// Non-success status or transport failure
    Http { status: Option<u16>, body: String },
    /// Response body was not the expected JSON shape
    Decode { url: String, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                body,
            } => write!(f, "HTTP {s}: {body}"),
            Self::Http { status: None, body } => write!(f, "HTTP error: {body}"),
            Self::Decode { url, message } => write!(f, "decode error for {url}: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create HTTP error from a reqwest transport error (no body available)
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
        }
    }

    /// Create a decode error from a serde_json failure
    pub fn decode(url: &str, e: &serde_json::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http_with_status() {
        let err = ApiError::Http {
            status: Some(404),
            body: "not found".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 404: not found");
    }

    #[test]
    fn display_http_without_status() {
        let err = ApiError::Http {
            status: None,
            body: "connection refused".to_string(),
        };
        assert!(format!("{err}").starts_with("HTTP error:"));
    }

    #[test]
    fn display_decode() {
        let bad: Result<i64, _> = serde_json::from_str("{");
        let err = ApiError::decode("https://example.org/x", &bad.unwrap_err());
        let msg = format!("{err}");
        assert!(msg.contains("https://example.org/x"));
    }
}
