use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use crate::{
    error::{error_message, parse_body},
    outcome::Outcome,
    request::resolve_url,
    retry::wait_before_retry,
    ApiError, ApiRequest, ClientOptions, FetchOptions, Result,
};

#[derive(Clone, Debug)]
/// HTTP client with per-attempt timeouts, bounded retries and classified errors.
///
/// Cloning is cheap; clones share the underlying connection pool.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Option<String>,
    options: ClientOptions,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Creates a client with default options and no base URL.
    pub fn new() -> Self {
        Self::with_http_client(reqwest::Client::new())
    }

    /// Wraps an existing `reqwest::Client`.
    ///
    /// The client should not carry its own total timeout: the wrapper applies
    /// one per attempt.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: None,
            options: ClientOptions::default(),
        }
    }

    /// Applies client-wide timeout and retry defaults.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Sets the base URL that relative targets such as `/api/clients` are joined onto.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Sends `request`, retrying transient failures.
    ///
    /// - 2xx/3xx: the response is returned unmodified.
    /// - 4xx: fails with [`ApiError::Client`] after a single call.
    /// - 5xx and transport failures: retried with linear backoff, then
    ///   surfaced as [`ApiError::Server`], [`ApiError::Timeout`] or
    ///   [`ApiError::Network`].
    pub async fn fetch(&self, request: ApiRequest) -> Result<Response> {
        let policy = request.options.resolve(&self.options);
        let url = resolve_url(self.base_url.as_deref(), &request.target);

        let mut attempt = 0usize;
        loop {
            let outcome = self.attempt(&request, &url, policy.timeout).await;

            if outcome.is_retryable() && attempt < policy.max_retries {
                attempt += 1;
                wait_before_retry(policy.retry_delay, attempt).await;
                continue;
            }

            return match outcome {
                Outcome::Success(response) => Ok(response),
                Outcome::ClientError(response) | Outcome::ServerError(response) => {
                    Err(Self::status_error(response).await)
                }
                Outcome::NetworkFailure { error, .. } => Err(ApiError::network(error)),
                Outcome::Timeout => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(url = %url, attempts = attempt + 1, "request timed out");
                    Err(ApiError::timeout())
                }
            };
        }
    }

    /// Sends `request` and decodes the response body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.fetch(request).await?;
        let bytes = response.bytes().await.map_err(ApiError::network)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::Serialization(format!("invalid JSON response: {err}")))
    }

    /// GETs `target` and decodes the response body as JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        target: &str,
        options: FetchOptions,
    ) -> Result<T> {
        self.fetch_json(ApiRequest::get(target).with_options(options))
            .await
    }

    /// Runs one attempt, racing the request against its own timer.
    ///
    /// Whichever settles first wins; dropping the loser either aborts the
    /// in-flight request or cancels the timer.
    async fn attempt(&self, request: &ApiRequest, url: &str, limit: Duration) -> Outcome {
        let mut builder = self.http.request(request.method.clone(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        match timeout(limit, builder.send()).await {
            Ok(Ok(response)) => Outcome::from_response(response),
            Ok(Err(err)) => Outcome::from_transport(err),
            Err(_elapsed) => Outcome::Timeout,
        }
    }

    async fn status_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        // An unreadable body is treated like an empty one.
        let text = response.text().await.unwrap_or_default();
        let body = parse_body(&text);

        if (400..500).contains(&status) {
            let message = error_message(body.as_ref(), || format!("Request failed: {status}"));
            ApiError::Client {
                status,
                message,
                body,
                raw_body: text,
            }
        } else {
            let message = error_message(body.as_ref(), || format!("Server error: {status}"));
            ApiError::Server {
                status,
                message,
                body,
                raw_body: text,
            }
        }
    }
}
