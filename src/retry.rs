use std::future::Future;
use std::time::Duration;

use crate::error::Result;

const BASE_DELAY: Duration = Duration::from_millis(200);
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Run `op`, re-running it up to `retries` more times while it fails with a
/// transient error. Backoff doubles from 200ms, capped at 30s.
pub async fn with_retries<T, F, Fut>(label: &str, retries: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < retries => {
                let delay = backoff(attempt);
                tracing::warn!(%err, attempt = attempt + 1, ?delay, "{label} failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    BASE_DELAY
        .checked_mul(2u32.saturating_pow(attempt))
        .map_or(MAX_DELAY, |delay| delay.min(MAX_DELAY))
}
