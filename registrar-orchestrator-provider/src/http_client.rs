//! Generic HTTP client tools
//!
//! Provide reusable HTTP request processing logic for registrar integrations.
//! Each provider encodes its own parameters; this module only moves them over the wire.
//!
//! # design principles
//! - **One round trip per call** - no retries, no pagination, no caching
//! - **Unified HTTP processing flow** - sending requests, logging, and reading responses
//! - **Pluggable transport** - providers talk to a [`Transport`], so tests can replay canned bodies

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP method used to deliver a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters go in the query string.
    Get,
    /// Parameters go in a form-encoded body.
    Post,
}

impl HttpMethod {
    /// Method name as used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Sends one encoded request and returns the raw response.
///
/// Implementations must not retry. Timeouts map to [`ProviderError::Timeout`], every other
/// delivery failure to [`ProviderError::NetworkError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers `params` to `url` and returns `(status_code, body)`.
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<(u16, String)>;
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// Unified processing: sending requests, logging, error handling
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, query or form body)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url_or_action` - URL or command name (for logging, must not contain credentials)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - returns status code and response text on success
    /// * `Err(ProviderError::Timeout)` - the request timed out
    /// * `Err(ProviderError::NetworkError)` - any other delivery failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // Gateway errors carry no registrar document
        if status_code == 429 || matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server unavailable (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }
}

/// [`Transport`] backed by a shared `reqwest` client.
pub struct ReqwestTransport {
    client: Client,
    provider_name: &'static str,
}

impl ReqwestTransport {
    /// Builds a transport with the given request and connect timeouts.
    pub fn new(
        provider_name: &'static str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: create_http_client(provider_name, timeout, connect_timeout)?,
            provider_name,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<(u16, String)> {
        let request = match method {
            HttpMethod::Get => self.client.get(url).query(params),
            HttpMethod::Post => self.client.post(url).form(params),
        };

        let command = params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("command"))
            .map_or("?", |(_, v)| v.as_str());

        HttpUtils::execute_request(
            request,
            self.provider_name,
            method.as_str(),
            &format!("{url} (command: {command})"),
        )
        .await
    }
}
