//! HTTP client for the resize endpoint.
//!
//! # Status codes are not the signal
//!
//! The resize service answers a failed resize with HTTP 500 *and* a JSON
//! body such as `{"error": "xrandr failed"}`.  The widget cares about the
//! body, not the status line, so `/health` and `/resize` read the body
//! whatever the status was:
//!
//! | What happened                         | `resize()` result                     |
//! |---------------------------------------|---------------------------------------|
//! | no response (refused, timeout, DNS)   | `Err(ClientError::Transport)`         |
//! | response body is not JSON             | `Err(ClientError::Decode)`            |
//! | JSON without `"success": true`        | `Ok(ResizeResponse { success: false })` |
//! | JSON with `"success": true`           | `Ok(ResizeResponse { success: true })`  |
//!
//! `/resolution` is only used by the command-line tool and treats any
//! non-2xx status as [`ClientError::Http`].

pub mod mock;

use std::time::Duration;

use async_trait::async_trait;
use autoresize_core::protocol::{health_url, resize_url, resolution_url};
use autoresize_core::{
    ApiEndpoint, ResizeFailure, ResizeOutcome, ResizeResponse, ResolutionResponse, Size,
    WidgetConfig,
};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::application::resize_api::ResizeApi;

/// Error type for a single call to the endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to resize endpoint failed: {message}")]
    Transport { message: String },

    #[error("resize endpoint answered HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("resize endpoint returned an unreadable body: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// Folds the error into the failure kind the widget reports.
    pub fn into_failure(self) -> ResizeFailure {
        match self {
            ClientError::Transport { message } => ResizeFailure::Transport(message),
            ClientError::Decode { message } => ResizeFailure::Decode(message),
            ClientError::Http { status, body } => {
                ResizeFailure::Transport(format!("HTTP {status}: {body}"))
            }
        }
    }
}

/// [`ResizeApi`] over plain HTTP `GET`s.
#[derive(Debug, Clone)]
pub struct HttpResizeClient {
    endpoint: ApiEndpoint,
    timeout: Duration,
    http: reqwest::Client,
}

impl HttpResizeClient {
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> Self {
        Self {
            endpoint,
            timeout,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// `GET /health`.  Any JSON body counts as healthy.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let (_, body) = self.fetch_json(&health_url(&self.endpoint)).await?;
        Ok(body)
    }

    /// `GET /resize?width=W&height=H`.
    pub async fn resize(&self, size: Size) -> Result<ResizeResponse, ClientError> {
        let (status, body) = self.fetch_json(&resize_url(&self.endpoint, size)).await?;
        let response = ResizeResponse::from_json(&body);
        debug!(
            %status,
            requested = %size,
            applied = ?response.applied_size(),
            success = response.success,
            "resize endpoint answered"
        );
        Ok(response)
    }

    /// `GET /resolution`: the remote session's current size.
    pub async fn current_resolution(&self) -> Result<Size, ClientError> {
        let (status, body) = self.fetch_json(&resolution_url(&self.endpoint)).await?;
        if !status.is_success() {
            return Err(ClientError::Http {
                status,
                body: body.to_string(),
            });
        }
        let resolution: ResolutionResponse =
            serde_json::from_value(body).map_err(|error| ClientError::Decode {
                message: error.to_string(),
            })?;
        Ok(resolution.into())
    }

    /// Sends one `GET` and parses the body as JSON, whatever the status.
    async fn fetch_json(&self, url: &str) -> Result<(StatusCode, Value), ClientError> {
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|error| ClientError::Transport {
                message: error.to_string(),
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| ClientError::Transport {
                message: error.to_string(),
            })?;

        let body = serde_json::from_slice::<Value>(&bytes).map_err(|error| ClientError::Decode {
            message: error.to_string(),
        })?;
        Ok((status, body))
    }
}

#[async_trait]
impl ResizeApi for HttpResizeClient {
    async fn request_resize(&self, size: Size) -> ResizeOutcome {
        match self.resize(size).await {
            Ok(response) => response.into_outcome(size),
            Err(error) => ResizeOutcome::Failure(error.into_failure()),
        }
    }

    async fn check_health(&self) -> bool {
        match self.health().await {
            Ok(_) => true,
            Err(error) => {
                debug!("health probe failed: {error}");
                false
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_and_decode_errors_keep_their_kind() {
        let transport = ClientError::Transport {
            message: "refused".to_string(),
        };
        let decode = ClientError::Decode {
            message: "expected value".to_string(),
        };

        assert_eq!(
            transport.into_failure(),
            ResizeFailure::Transport("refused".to_string())
        );
        assert_eq!(
            decode.into_failure(),
            ResizeFailure::Decode("expected value".to_string())
        );
    }

    #[test]
    fn test_http_error_maps_to_transport_failure() {
        let error = ClientError::Http {
            status: StatusCode::NOT_FOUND,
            body: "{}".to_string(),
        };

        assert_eq!(error.into_failure().reason(), "network or parse error");
    }

    #[test]
    fn test_from_config_uses_endpoint_and_timeout() {
        let config = WidgetConfig {
            request_timeout_ms: 750,
            ..WidgetConfig::default()
        };

        let client = HttpResizeClient::from_config(&config);

        assert_eq!(client.endpoint().base_url(), "http://localhost:6081");
        assert_eq!(client.timeout, Duration::from_millis(750));
    }
}
