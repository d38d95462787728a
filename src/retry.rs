//! Fixed-delay retry for fallible async operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// How many times to run an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. An attempt count of zero is treated as one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `operation` until it succeeds or the attempt budget is spent.
    ///
    /// On exhaustion the error of the last attempt is returned together
    /// with the number of attempts made.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, (u32, E)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => return Err((attempt, e)),
                Err(e) => {
                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, self.max_attempts, e, self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
