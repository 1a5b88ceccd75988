use crate::core::errors::ExchangeError;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;
use tracing::warn;

/// How often and how patiently to repeat a failing call.
///
/// Every call is attempted at least once. Between attempts the calling task
/// sleeps for `delay`. Only errors accepted by the predicate are repeated;
/// anything else is returned immediately, as is the last error once the
/// attempts run out.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: usize,
    delay: Duration,
    retry_if: fn(&ExchangeError) -> bool,
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// Policy repeating transport failures only.
    pub const fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            retry_if: ExchangeError::is_transport,
        }
    }

    /// Replace the predicate deciding which errors are worth repeating.
    pub const fn retry_if(mut self, retry_if: fn(&ExchangeError) -> bool) -> Self {
        self.retry_if = retry_if;
        self
    }

    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn run<A, F, T>(&self, operation: &str, mut action: A) -> Result<T, ExchangeError>
    where
        A: FnMut() -> F,
        F: Future<Output = Result<T, ExchangeError>>,
    {
        let attempts = AtomicUsize::new(0);
        let max_attempts = self.max_attempts.max(1);
        let retry_if = self.retry_if;
        let strategy = FixedInterval::new(self.delay).take(max_attempts - 1);

        RetryIf::spawn(
            strategy,
            || {
                attempts.fetch_add(1, Ordering::Relaxed);
                action()
            },
            |e: &ExchangeError| {
                let retry = retry_if(e);
                if retry {
                    warn!(
                        operation,
                        attempt = attempts.load(Ordering::Relaxed),
                        max_attempts,
                        error = %e,
                        "Request attempt failed"
                    );
                }
                retry
            },
        )
        .await
    }
}
