//! Readiness probe for a freshly started database service.
//!
//! A bounded retry loop: attempt to open an authenticated connection, and
//! if that fails, sleep a fixed delay and try again, up to a fixed attempt
//! budget. The delay never changes (no backoff, no jitter) and no delay is
//! spent after the final attempt, so a full failure blocks for exactly
//! (N-1) x delay.
//!
//! The probe is generic over the connection attempt: callers pass an async
//! dial closure that opens and immediately drops one real connection.
//! Connection errors and authentication errors are treated identically;
//! any failure triggers a retry.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

/// Attempt budget and inter-attempt delay for one readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    max_attempts: u32,
    delay: Duration,
}

impl ProbeConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// A budget of zero attempts would mean "never ready" without trying;
    /// the budget is clamped to at least one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

/// Outcome of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    /// Whether the service accepted a connection within the budget.
    pub ready: bool,
    /// Number of attempts actually made (== the succeeding attempt on
    /// success, == the full budget on failure).
    pub attempts: u32,
}

/// Wait for a service to become ready.
///
/// `dial` is called with the 1-based attempt number and must resolve to
/// `Ok(())` once the service accepts an authenticated connection. The
/// first success returns immediately; a success on attempt k incurs
/// exactly k-1 sleeps.
pub async fn wait_ready<F, Fut>(config: &ProbeConfig, mut dial: F) -> ProbeReport
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    for attempt in 1..=config.max_attempts {
        match dial(attempt).await {
            Ok(()) => {
                info!(attempt, "service is ready");
                return ProbeReport {
                    ready: true,
                    attempts: attempt,
                };
            }
            Err(e) => {
                debug!(
                    attempt,
                    max_attempts = config.max_attempts,
                    error = %e,
                    "service not ready yet"
                );
                if attempt < config.max_attempts {
                    tokio::time::sleep(config.delay).await;
                }
            }
        }
    }

    warn!(
        attempts = config.max_attempts,
        "service did not become ready within the attempt budget"
    );
    ProbeReport {
        ready: false,
        attempts: config.max_attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> ProbeConfig {
        ProbeConfig::new(max_attempts, Duration::ZERO)
    }

    #[tokio::test]
    async fn ready_on_first_attempt() {
        let report = wait_ready(&fast(5), |_| async { Ok(()) }).await;
        assert!(report.ready);
        assert_eq!(report.attempts, 1);
    }

    #[tokio::test]
    async fn ready_on_second_attempt() {
        let report = wait_ready(&fast(5), |attempt| async move {
            if attempt >= 2 {
                Ok(())
            } else {
                anyhow::bail!("connection refused")
            }
        })
        .await;
        assert!(report.ready);
        assert_eq!(report.attempts, 2);
    }

    #[tokio::test]
    async fn never_ready_exhausts_exact_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let report = wait_ready(&fast(3), move |_| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                anyhow::bail!("connection refused")
            }
        })
        .await;
        assert!(!report.ready);
        assert_eq!(report.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn success_stops_further_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let report = wait_ready(&fast(10), move |attempt| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                if attempt == 4 {
                    Ok(())
                } else {
                    anyhow::bail!("not yet")
                }
            }
        })
        .await;
        assert!(report.ready);
        assert_eq!(report.attempts, 4);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_blocks_one_delay_less_than_budget() {
        // 4 attempts, 2s delay: sleeps between attempts only, so 3 x 2s.
        let config = ProbeConfig::new(4, Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        let report = wait_ready(&config, |_| async { anyhow::bail!("refused") }).await;
        assert!(!report.ready);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_attempt_k_sleeps_k_minus_one_delays() {
        let config = ProbeConfig::new(30, Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        let report = wait_ready(&config, |attempt| async move {
            if attempt == 3 {
                Ok(())
            } else {
                anyhow::bail!("refused")
            }
        })
        .await;
        assert!(report.ready);
        assert_eq!(report.attempts, 3);
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_success_sleeps_not_at_all() {
        let config = ProbeConfig::new(30, Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        wait_ready(&config, |_| async { Ok(()) }).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn zero_budget_is_clamped_to_one() {
        let config = ProbeConfig::new(0, Duration::ZERO);
        assert_eq!(config.max_attempts(), 1);
    }

    #[tokio::test]
    async fn tcp_dial_against_unreachable_port_is_retried() {
        // Bind then drop a listener to get a port that refuses connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let report = wait_ready(&fast(3), move |_| async move {
            tokio::net::TcpStream::connect(addr).await?;
            Ok(())
        })
        .await;
        assert!(!report.ready);
        assert_eq!(report.attempts, 3);
    }

    #[tokio::test]
    async fn tcp_dial_against_live_listener_succeeds() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let _ = listener.accept().await;
            }
        });

        let report = wait_ready(&fast(3), move |_| async move {
            let stream = tokio::net::TcpStream::connect(addr).await?;
            drop(stream);
            Ok(())
        })
        .await;
        assert!(report.ready);
        assert_eq!(report.attempts, 1);
    }
}
