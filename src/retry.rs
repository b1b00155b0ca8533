use std::time::Duration;

use tokio::time::sleep;

/// Linear backoff: `base * retry_index`, where the first retry has index 1.
pub fn backoff_delay(base: Duration, retry_index: usize) -> Duration {
    let factor = u32::try_from(retry_index).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

/// Waits before retry number `retry_index`.
pub(crate) async fn wait_before_retry(base: Duration, retry_index: usize) {
    let delay = backoff_delay(base, retry_index);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        retry = retry_index,
        delay_ms = delay.as_millis() as u64,
        "retrying request"
    );

    sleep(delay).await;
}
