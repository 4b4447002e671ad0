//! Backoff schedule and slot policy for retries

use std::time::Duration;

/// Exponential backoff schedule between failed attempts
#[derive(Debug, Clone, Copy)]
pub struct BackoffSchedule {
    /// Base delay, doubled for each further attempt
    pub base: Duration,
}

impl BackoffSchedule {
    pub fn new(base: Duration) -> Self {
        Self { base }
    }

    /// Delay to sleep after failed attempt number `attempt` (1-based)
    ///
    /// `base * 2^(attempt - 1)`, uncapped: large attempt counts mean
    /// arbitrarily long tails.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        self.base.mul_f64(2f64.powi(exponent as i32))
    }
}

/// What a runner does with its gate slot while sleeping between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffPolicy {
    /// Keep the slot through backoff sleeps. A persistently failing task
    /// therefore reduces effective throughput, not just CPU.
    #[default]
    HoldSlot,

    /// Return the slot before sleeping and reacquire it afterwards. The
    /// reacquisition wait counts into the task's elapsed time.
    ReleaseSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_calculation() {
        let schedule = BackoffSchedule::new(Duration::from_millis(500));

        assert_eq!(schedule.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(schedule.delay_for_attempt(2), Duration::from_millis(1000));
        assert_eq!(schedule.delay_for_attempt(3), Duration::from_millis(2000));
        assert_eq!(schedule.delay_for_attempt(4), Duration::from_millis(4000));
    }

    #[test]
    fn test_delay_is_uncapped() {
        let schedule = BackoffSchedule::new(Duration::from_secs(2));

        assert_eq!(schedule.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(schedule.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(schedule.delay_for_attempt(10), Duration::from_secs(1024));
    }

    #[test]
    fn test_default_policy_holds_slot() {
        assert_eq!(BackoffPolicy::default(), BackoffPolicy::HoldSlot);
    }
}
