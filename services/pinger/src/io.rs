//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

use crate::PingerError;

/// HTTP response from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a POST request with a JSON body.
    ///
    /// `deadline` bounds the wait for the response status. A status that has
    /// arrived is final: the body is read afterwards on its own bounded wait,
    /// and an unreadable body becomes an empty string.
    ///
    /// Any received response is `Ok`, whatever its status. `Err` is reserved
    /// for transport failures and [`PingerError::Timeout`].
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        deadline: Duration,
    ) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        deadline: Duration,
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("POST {}", url);
        // Dropping the send future on timeout aborts the request.
        let response = tokio::time::timeout(deadline, self.client.post(url).json(body).send())
            .await
            .map_err(|_| PingerError::Timeout(deadline))?
            .map_err(|e| PingerError::Http(error_chain(&e.without_url())))?;

        let status = response.status();
        let body = match tokio::time::timeout(deadline, response.text()).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::debug!("Reading response body from {} failed: {}", url, error_chain(&e));
                String::new()
            }
            Err(_) => {
                tracing::debug!("Reading response body from {} timed out", url);
                String::new()
            }
        };

        tracing::debug!("POST {} -> {} ({} bytes)", url, status.as_u16(), body.len());
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Render an error followed by each of its sources, `outer: inner: root`
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        // Some wrappers already embed their source in their own message.
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
