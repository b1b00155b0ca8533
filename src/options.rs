use std::time::Duration;

/// Default per-attempt timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
/// Default number of retries after the initial attempt.
pub const DEFAULT_RETRIES: usize = 2;
/// Base retry delay in milliseconds (linear strategy).
pub const RETRY_DELAY_MS: u64 = 1_000;

/// Configures client-wide timeout and retry defaults.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry delay in milliseconds, multiplied by the retry index.
    pub retry_delay_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_RETRIES,
            retry_delay_ms: RETRY_DELAY_MS,
        }
    }
}

/// Per-call overrides of [`ClientOptions`].
///
/// Every field is optional and independently overridable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FetchOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Number of retries on network failure or 5xx.
    pub retries: Option<usize>,
    /// Forces zero retries, for mutations that must not be duplicated.
    pub skip_retry: bool,
}

impl FetchOptions {
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn retries(mut self, retries: usize) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn skip_retry(mut self) -> Self {
        self.skip_retry = true;
        self
    }

    pub(crate) fn resolve(&self, defaults: &ClientOptions) -> AttemptPolicy {
        let max_retries = if self.skip_retry {
            0
        } else {
            self.retries.unwrap_or(defaults.max_retries)
        };
        AttemptPolicy {
            timeout: Duration::from_millis(self.timeout_ms.unwrap_or(defaults.timeout_ms)),
            max_retries,
            retry_delay: Duration::from_millis(defaults.retry_delay_ms),
        }
    }
}

/// Effective settings for one logical call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AttemptPolicy {
    pub timeout: Duration,
    pub max_retries: usize,
    pub retry_delay: Duration,
}
