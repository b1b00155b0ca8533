use serde_json::Value as JsonValue;

/// User-facing message surfaced once a timed-out call has exhausted its retries.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

/// Error type returned by [`ApiClient`](crate::ApiClient) calls.
///
/// `fetch` only ever produces the first four variants; `Serialization` comes
/// from the JSON helpers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP status in `400..500`. Never retried.
    #[error("{message}")]
    Client {
        status: u16,
        /// Value of the body's `error` field, or `Request failed: <status>`.
        message: String,
        /// Response body parsed as JSON, if it was JSON.
        body: Option<JsonValue>,
        /// Response body as received.
        raw_body: String,
    },
    /// HTTP status of 500 or above, after retries were exhausted.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        body: Option<JsonValue>,
        raw_body: String,
    },
    /// Every attempt ran past its timeout.
    #[error("{message}")]
    Timeout { message: String },
    /// Transport-level failure from `reqwest`.
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// Request body encoding or response body decoding error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    pub(crate) fn timeout() -> Self {
        Self::Timeout {
            message: TIMEOUT_MESSAGE.to_owned(),
        }
    }

    pub(crate) fn network(source: reqwest::Error) -> Self {
        Self::Network {
            message: source.to_string(),
            source,
        }
    }

    /// HTTP status code, when the failure came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed JSON body, when the failing response carried one.
    pub fn body(&self) -> Option<&JsonValue> {
        match self {
            Self::Client { body, .. } | Self::Server { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Response body text as received, when the failure came from an HTTP response.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Client { raw_body, .. } | Self::Server { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::Client { message, .. }
            | Self::Server { message, .. }
            | Self::Timeout { message }
            | Self::Network { message, .. }
            | Self::Serialization(message) => message,
        }
    }

    /// Returns `true` for 401/403, where callers usually send the user back to login.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` when the failure class is one the wrapper retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Server { .. } | Self::Timeout { .. } | Self::Network { .. }
        )
    }
}

/// Extracts the human-readable message from an error response body.
///
/// Uses the string `error` field of a JSON object; falls back otherwise.
pub(crate) fn error_message(body: Option<&JsonValue>, fallback: impl FnOnce() -> String) -> String {
    body.and_then(|body| body.get("error"))
        .and_then(JsonValue::as_str)
        .map(str::to_owned)
        .unwrap_or_else(fallback)
}

/// Parses raw response text as JSON, treating empty or invalid text as absent.
pub(crate) fn parse_body(text: &str) -> Option<JsonValue> {
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}
