use rand::Rng;
use std::time::Duration;

/// Retry schedule for outbound transcode submissions.
///
/// Attempts are capped, delays double per attempt up to `max_delay`, and up
/// to 50% random jitter is added so retries from parallel invocations do not
/// line up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: max_delay.max(base_delay),
        }
    }

    /// Delay before the attempt following `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let capped = self
            .base_delay
            .saturating_mul(1u32 << exp)
            .min(self.max_delay);
        let jitter_ms = rand::rng().random_range(0..=capped.as_millis() as u64 / 2);
        capped + Duration::from_millis(jitter_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::from_millis(100), Duration::from_millis(500));
        assert_eq!(policy.max_attempts, 1);
    }

    #[test]
    fn backoff_stays_within_jittered_bounds() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100), Duration::from_millis(400));
        for _ in 0..50 {
            let first = policy.backoff(1);
            assert!(first >= Duration::from_millis(100));
            assert!(first <= Duration::from_millis(150));
        }
    }

    #[test]
    fn backoff_is_capped_at_max_delay() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100), Duration::from_millis(400));
        for attempt in 1..=10 {
            // cap plus the 50% jitter ceiling
            assert!(policy.backoff(attempt) <= Duration::from_millis(600));
        }
    }

    #[test]
    fn max_delay_never_below_base_delay() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500), Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_millis(500));
    }
}
