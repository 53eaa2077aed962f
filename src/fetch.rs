//! Interface to the HTTP collaborator.
//!
//! The engine never builds clients, headers, or retry policies itself. It
//! hands URLs to a [`Fetcher`] and interprets the status codes it gets back.

use crate::error::{LookupError, Result};
use async_trait::async_trait;

/// A response from the fetch collaborator: status code plus decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse<T> {
    pub status: u16,
    pub body: T,
}

impl<T> FetchResponse<T> {
    pub const fn new(status: u16, body: T) -> Self {
        Self { status, body }
    }

    /// A 200 response.
    pub const fn ok(body: T) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Unwrap the body of a 2xx response, or report the status as [`LookupError::Http`].
    pub fn into_success(self, url: &str) -> Result<T> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(LookupError::Http {
                status: self.status,
                url: url.to_string(),
            })
        }
    }
}

/// Transport used by inventory builds and scraping adapters.
///
/// Implementations return `Err` only when no response was obtained at all;
/// any response, including non-2xx ones, comes back as a [`FetchResponse`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<FetchResponse<Vec<u8>>>;

    async fn fetch_text(&self, url: &str) -> Result<FetchResponse<String>>;

    /// JSON body; an empty or undecodable body is `Value::Null`.
    async fn fetch_json(&self, url: &str) -> Result<FetchResponse<serde_json::Value>>;

    /// HTML after client-side scripts have populated the page.
    ///
    /// Defaults to the raw page. Collaborators backed by a script-capable
    /// renderer override this.
    async fn fetch_rendered(&self, url: &str) -> Result<FetchResponse<String>> {
        self.fetch_text(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(301, false)]
    #[case(404, false)]
    #[case(500, false)]
    fn test_is_success(#[case] status: u16, #[case] expected: bool) {
        check!(FetchResponse::new(status, ()).is_success() == expected);
    }

    #[test]
    fn test_into_success_reports_status() {
        let response = FetchResponse::new(404, String::new());
        let_assert!(Err(LookupError::Http { status, url }) = response.into_success("https://x/objects.inv"));
        check!(status == 404);
        check!(url == "https://x/objects.inv");
    }
}
