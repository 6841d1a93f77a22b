use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::ParleyError;

/// Bound `operation` to `limit` wall-clock time.
///
/// If the operation settles first, the deadline timer is dropped and the
/// operation's result is returned unchanged — `abort` stays uncancelled. If
/// the deadline fires first, `abort` is cancelled as a best-effort signal to
/// whatever work backs the operation, and `Timeout` is returned immediately
/// without waiting for the abort to take effect.
pub async fn with_timeout<T, F>(
    limit: Duration,
    abort: CancellationToken,
    operation: F,
) -> Result<T, ParleyError>
where
    F: Future<Output = Result<T, ParleyError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            abort.cancel();
            Err(ParleyError::Timeout(limit.as_millis() as u64))
        }
    }
}
