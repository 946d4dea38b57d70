//! Typed client for the game backend REST API.
//!
//! Every page in the panel is a view over this API: player characters and
//! accounts, guilds, reward rules and transactions, news articles, operator
//! accounts, and the monitoring stats endpoints. All endpoints speak JSON and
//! authorize with a bearer access token, except the two refresh-cookie
//! endpoints handled in [`auth`].
//!
//! Backend error bodies are surfaced verbatim in
//! [`GameApiError::Api::message`] so privileged-action failures can be shown
//! to the operator unchanged.

mod auth;
mod guilds;
mod news;
mod players;
mod rewards;
mod stats;
pub mod types;

pub use auth::{AuthPayload, REFRESH_COOKIE};

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::GameApiConfig;

/// Errors that can occur when calling the game backend.
#[derive(Debug, Error)]
pub enum GameApiError {
    /// Network-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an error response. The message is the backend's
    /// own error body, unmodified.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// A request URL could not be constructed.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl GameApiError {
    /// Whether this error is an authentication/authorization rejection.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status: 401 | 403,
                ..
            }
        )
    }
}

/// Game backend API client.
///
/// Cheap to clone; all clones share one connection pool. The client holds no
/// credentials itself - the operator's bearer token is passed per call, and
/// refresh cookies are forwarded explicitly by the auth methods.
#[derive(Clone)]
pub struct GameClient {
    inner: Arc<GameClientInner>,
}

struct GameClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl GameClient {
    /// Create a new game backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &GameApiConfig) -> Result<Self, GameApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(GameClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The configured backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Execute a request, mapping non-2xx responses to [`GameApiError::Api`].
    pub(crate) async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GameApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GameApiError::Api {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }

    /// Execute a request and decode the JSON response body.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GameApiError> {
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// GET a JSON resource with bearer authorization.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<T, GameApiError> {
        self.execute_json(self.http().get(self.url(path)).bearer_auth(access_token))
            .await
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend usually answers `{"message": "..."}` or `{"error": "..."}`;
/// anything else is passed through as raw text so the operator still sees
/// what the backend said.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_owned();
            }
        }
    }
    if body.trim().is_empty() {
        "(empty error body)".to_owned()
    } else {
        body.trim().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_json() {
        assert_eq!(
            extract_error_message(r#"{"message": "invalid password"}"#),
            "invalid password"
        );
        assert_eq!(
            extract_error_message(r#"{"error": "account is reward-banned"}"#),
            "account is reward-banned"
        );
    }

    #[test]
    fn test_extract_error_message_raw() {
        assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_error_message("  "), "(empty error body)");
        // JSON without a known key falls through to raw text
        assert_eq!(extract_error_message(r#"{"code": 7}"#), r#"{"code": 7}"#);
    }

    #[test]
    fn test_auth_failure_classification() {
        let unauthorized = GameApiError::Api {
            status: 401,
            message: "expired".to_owned(),
        };
        assert!(unauthorized.is_auth_failure());

        let server = GameApiError::Api {
            status: 500,
            message: "boom".to_owned(),
        };
        assert!(!server.is_auth_failure());
    }
}
