use std::time::Duration;
use std::thread;
use log::{debug, warn};

/// Fixed-delay retry policy
///
/// An operation is attempted up to `attempts` times, sleeping `delay` between
/// consecutive attempts (never after the last one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, at least 1
    pub attempts: usize,
    /// Delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Retry without sleeping, for tests
    pub fn immediate(attempts: usize) -> Self {
        Self::new(attempts, Duration::ZERO)
    }

    /// Execute a closure with retry logic
    ///
    /// The closure receives the 0-based attempt number and returns `Some`
    /// on success.
    ///
    /// # Returns
    /// * `Some(T)` if an attempt succeeded
    /// * `None` if all attempts were exhausted
    pub fn execute<T, F>(&self, operation_name: &str, mut operation: F) -> Option<T>
    where
        F: FnMut(usize) -> Option<T>,
    {
        for attempt in 0..self.attempts {
            debug!("Attempting {} (attempt {}/{})", operation_name, attempt + 1, self.attempts);
            if let Some(result) = operation(attempt) {
                debug!("{} succeeded on attempt {}", operation_name, attempt + 1);
                return Some(result);
            }

            if attempt + 1 < self.attempts && !self.delay.is_zero() {
                debug!("Waiting {:?} before next {} attempt", self.delay, operation_name);
                thread::sleep(self.delay);
            }
        }

        warn!("{} failed after {} attempts, giving up", operation_name, self.attempts);
        None
    }
}

impl Default for RetryPolicy {
    /// 3 attempts, 1 second apart
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).attempts, 1);
    }

    #[test]
    fn test_succeeds_on_later_attempt() {
        let policy = RetryPolicy::immediate(3);
        let mut calls = Vec::new();
        let result = policy.execute("test", |attempt| {
            calls.push(attempt);
            if attempt == 1 { Some("ok") } else { None }
        });
        assert_eq!(result, Some("ok"));
        assert_eq!(calls, vec![0, 1]);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let policy = RetryPolicy::immediate(3);
        let mut count = 0;
        let result: Option<()> = policy.execute("test", |_| {
            count += 1;
            None
        });
        assert_eq!(result, None);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_sleeps_between_attempts() {
        let policy = RetryPolicy::new(2, Duration::from_millis(50));
        let start = Instant::now();
        let _: Option<()> = policy.execute("test", |_| None);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_no_sleep_after_last_attempt() {
        // a sleep after the only attempt would take the full delay
        let policy = RetryPolicy::new(1, Duration::from_secs(30));
        let start = Instant::now();
        let _: Option<()> = policy.execute("test", |_| None);
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
