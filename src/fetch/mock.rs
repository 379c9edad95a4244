//! In-memory [`Fetch`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Fetch, FetchError, Fetched};

/// Serves fixed responses keyed by URL; anything else is a 404.
/// Every requested URL is recorded in order.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Fetched>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url` with the given content type.
    pub fn with(mut self, url: &str, content_type: &str, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Fetched {
                body: body.to_string(),
                content_type: Some(content_type.to_string()),
            },
        );
        self
    }

    pub fn with_text(self, url: &str, body: &str) -> Self {
        self.with(url, "text/plain; charset=utf-8", body)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
