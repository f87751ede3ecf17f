use backoff::backoff::Backoff;
use std::time::Duration;

/// Delay before the next attempt, as a function of the attempt that just failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffPolicy {
    /// `min(base * 2^(attempt - 1), cap)`
    Exponential { base: Duration, cap: Duration },
    /// `min(step * attempt, cap)`
    Linear { step: Duration, cap: Duration },
}

impl BackoffPolicy {
    /// Broadcast retries in standard mode
    pub const STANDARD: Self = BackoffPolicy::Exponential {
        base: Duration::from_millis(2_000),
        cap: Duration::from_millis(15_000),
    };

    /// Broadcast retries in fast mode
    pub const FAST: Self = BackoffPolicy::Linear {
        step: Duration::from_millis(1_000),
        cap: Duration::from_millis(3_000),
    };

    /// Between confirmation attempts
    pub const CONFIRMATION: Self = BackoffPolicy::Linear {
        step: Duration::from_millis(3_000),
        cap: Duration::from_millis(10_000),
    };

    /// Rate-limited validity anchor fetches
    pub const RATE_LIMITED: Self = BackoffPolicy::Exponential {
        base: Duration::from_millis(2_000),
        cap: Duration::from_millis(8_000),
    };

    /// Attempts are numbered from 1; 0 is treated as 1.
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match *self {
            BackoffPolicy::Exponential { base, cap } => 2u32
                .checked_pow(attempt - 1)
                .and_then(|factor| base.checked_mul(factor))
                .map_or(cap, |delay| delay.min(cap)),
            BackoffPolicy::Linear { step, cap } => step
                .checked_mul(attempt)
                .map_or(cap, |delay| delay.min(cap)),
        }
    }
}

/// A bounded run of attempts under one [`BackoffPolicy`].
///
/// Yields one delay between each pair of consecutive attempts, so a schedule
/// for `max_attempts` attempts yields `max_attempts - 1` delays and then
/// stops.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    policy: BackoffPolicy,
    max_attempts: u32,
    attempt: u32,
}

impl RetrySchedule {
    pub fn new(policy: BackoffPolicy, max_attempts: u32) -> Self {
        Self {
            policy,
            max_attempts,
            attempt: 1,
        }
    }

    /// The attempt currently in flight.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_last_attempt(&self) -> bool {
        self.attempt >= self.max_attempts
    }
}

impl Backoff for RetrySchedule {
    fn reset(&mut self) {
        self.attempt = 1;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.is_last_attempt() {
            return None;
        }
        let delay = self.policy.delay(self.attempt);
        self.attempt += 1;
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_delays() {
        let delays: Vec<u128> = (1..=6)
            .map(|attempt| BackoffPolicy::STANDARD.delay(attempt).as_millis())
            .collect();
        assert_eq!(delays, vec![2_000, 4_000, 8_000, 15_000, 15_000, 15_000]);
    }

    #[test]
    fn test_fast_delays() {
        let delays: Vec<u128> = (1..=5)
            .map(|attempt| BackoffPolicy::FAST.delay(attempt).as_millis())
            .collect();
        assert_eq!(delays, vec![1_000, 2_000, 3_000, 3_000, 3_000]);
    }

    #[test]
    fn test_confirmation_delays() {
        let delays: Vec<u128> = (1..=4)
            .map(|attempt| BackoffPolicy::CONFIRMATION.delay(attempt).as_millis())
            .collect();
        assert_eq!(delays, vec![3_000, 6_000, 9_000, 10_000]);
    }

    #[test]
    fn test_rate_limited_delays() {
        let delays: Vec<u128> = (1..=4)
            .map(|attempt| BackoffPolicy::RATE_LIMITED.delay(attempt).as_millis())
            .collect();
        assert_eq!(delays, vec![2_000, 4_000, 8_000, 8_000]);
    }

    #[test]
    fn test_delays_are_monotonic_and_capped() {
        for policy in [
            BackoffPolicy::STANDARD,
            BackoffPolicy::FAST,
            BackoffPolicy::CONFIRMATION,
            BackoffPolicy::RATE_LIMITED,
        ] {
            let mut previous = Duration::ZERO;
            for attempt in 1..=64 {
                let delay = policy.delay(attempt);
                assert!(delay >= previous, "{:?} attempt {}", policy, attempt);
                previous = delay;
            }
        }
        assert_eq!(
            BackoffPolicy::STANDARD.delay(u32::MAX),
            Duration::from_millis(15_000)
        );
    }

    #[test]
    fn test_schedule_yields_one_delay_between_attempts() {
        let mut schedule = RetrySchedule::new(BackoffPolicy::STANDARD, 3);

        assert_eq!(schedule.attempt(), 1);
        assert_eq!(schedule.next_backoff(), Some(Duration::from_millis(2_000)));
        assert_eq!(schedule.next_backoff(), Some(Duration::from_millis(4_000)));
        assert!(schedule.is_last_attempt());
        assert_eq!(schedule.next_backoff(), None);
        assert_eq!(schedule.attempt(), 3);

        schedule.reset();
        assert_eq!(schedule.attempt(), 1);
    }

    #[test]
    fn test_single_attempt_schedule_never_sleeps() {
        let mut schedule = RetrySchedule::new(BackoffPolicy::FAST, 1);
        assert_eq!(schedule.next_backoff(), None);
    }
}
