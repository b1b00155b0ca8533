//! Per-attempt classification.
//!
//! Each attempt settles into exactly one [`Outcome`]; the retry loop only
//! looks at the outcome to decide between returning, retrying and failing.

use reqwest::{Response, StatusCode};

/// Tagged result of a single attempt.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// 2xx/3xx (and the rare 1xx that reaches us).
    Success(Response),
    /// 4xx. Terminal.
    ClientError(Response),
    /// 5xx. Retryable.
    ServerError(Response),
    /// Transport error from `reqwest`.
    NetworkFailure {
        error: reqwest::Error,
        retryable: bool,
    },
    /// The attempt's timer fired before the response arrived.
    Timeout,
}

impl Outcome {
    pub(crate) fn from_response(response: Response) -> Self {
        match classify_status(response.status()) {
            StatusClass::Success => Self::Success(response),
            StatusClass::Client => Self::ClientError(response),
            StatusClass::Server => Self::ServerError(response),
        }
    }

    /// Classifies by the structured error kind rather than message text.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        let retryable = is_transient_transport(&error);
        Self::NetworkFailure { error, retryable }
    }

    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            Self::ServerError(_) | Self::Timeout => true,
            Self::NetworkFailure { retryable, .. } => *retryable,
            Self::Success(_) | Self::ClientError(_) => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StatusClass {
    Success,
    Client,
    Server,
}

/// 4xx is a client error; 5xx and anything above is a server error.
pub(crate) fn classify_status(status: StatusCode) -> StatusClass {
    match status.as_u16() {
        400..=499 => StatusClass::Client,
        500..=u16::MAX => StatusClass::Server,
        _ => StatusClass::Success,
    }
}

fn is_transient_transport(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_request() || error.is_body()
}
