//! Single-shot HTTP retrieval used by the license resolver.
//!
//! Every failure (transport error, timeout, non-2xx status) comes back as a
//! [`FetchError`]; callers decide whether that is fatal. The resolver never
//! treats it as such.

#[cfg(test)]
pub mod mock;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;

use crate::config::FetchConfig;

/// A successfully retrieved resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub body: String,
    pub content_type: Option<String>,
}

impl Fetched {
    pub fn is_plain_text(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/plain"))
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError>;
}

/// [`Fetch`] over a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(transport)?;

        Ok(Fetched {
            body: String::from_utf8_lossy(&bytes).into_owned(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/LICENSE"))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&FetchConfig::default()).unwrap()
    }

    fn fetched(content_type: Option<&str>) -> Fetched {
        Fetched {
            body: String::new(),
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_plain_text_detection() {
        assert!(fetched(Some("text/plain")).is_plain_text());
        assert!(fetched(Some("text/plain; charset=utf-8")).is_plain_text());
        assert!(!fetched(Some("text/html; charset=utf-8")).is_plain_text());
        assert!(!fetched(None).is_plain_text());
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let server = serve(ResponseTemplate::new(404).set_body_string("Not Found")).await;
        let url = format!("{}/LICENSE", server.uri());

        match fetcher().fetch(&url).await {
            Err(FetchError::Status { url: failed, status }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_text_body_and_content_type() {
        let server = serve(
            ResponseTemplate::new(200)
                .set_body_raw("MIT License", "text/plain; charset=utf-8"),
        )
        .await;

        let fetched = fetcher()
            .fetch(&format!("{}/LICENSE", server.uri()))
            .await
            .unwrap();
        assert_eq!(fetched.body, "MIT License");
        assert_eq!(
            fetched.content_type.as_deref(),
            Some("text/plain; charset=utf-8")
        );
        assert!(fetched.is_plain_text());
    }

    #[tokio::test]
    async fn test_invalid_utf8_decoded_lossily() {
        let bytes: Vec<u8> = vec![b'a', 0xff, b'b'];
        let server = serve(
            ResponseTemplate::new(200).set_body_raw(bytes, "application/octet-stream"),
        )
        .await;

        let fetched = fetcher()
            .fetch(&format!("{}/LICENSE", server.uri()))
            .await
            .unwrap();
        assert_eq!(fetched.body, "a\u{fffd}b");
        assert!(!fetched.is_plain_text());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let err = fetcher().fetch("http://127.0.0.1:9/LICENSE").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
