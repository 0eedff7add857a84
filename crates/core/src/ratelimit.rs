//! Process-local sliding-window rate limiter for the chat assistant.
//!
//! The caller supplies `now` on every check, so tests never sleep and the
//! server can gate per-session limiters off one clock read. A rejected call
//! consumes no slot.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const DEFAULT_MAX_REQUESTS: usize = 4;
pub const DEFAULT_WINDOW_SECS: i64 = 60;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RateLimitDecision {
    Allowed {
        /// Slots left in the window after this call.
        remaining: usize,
    },
    Rejected {
        /// When the oldest in-window request ages out and a slot opens.
        window_ends_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    accepted: Vec<DateTime<Utc>>,
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, Duration::seconds(DEFAULT_WINDOW_SECS))
    }
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self { max_requests, window, accepted: Vec::new() }
    }

    /// Admits or rejects a call at `now`. Accepted calls record their
    /// timestamp; rejections report when the window reopens.
    pub fn check(&mut self, now: DateTime<Utc>) -> RateLimitDecision {
        self.evict(now);

        if self.accepted.len() >= self.max_requests {
            // `evict` left at least one entry, all inside the window.
            let oldest = self.accepted[0];
            return RateLimitDecision::Rejected { window_ends_at: oldest + self.window };
        }

        self.accepted.push(now);
        RateLimitDecision::Allowed { remaining: self.max_requests - self.accepted.len() }
    }

    /// Whole seconds until the next slot opens; zero when the window is
    /// already open. Recomputed per tick for UI countdowns.
    pub fn seconds_until_reset(&self, now: DateTime<Utc>) -> i64 {
        let in_window =
            self.accepted.iter().filter(|accepted| **accepted > now - self.window).count();
        if in_window < self.max_requests {
            return 0;
        }

        let oldest = self
            .accepted
            .iter()
            .find(|accepted| **accepted > now - self.window)
            .copied()
            .unwrap_or(now);
        let window_ends_at = oldest + self.window;
        let millis = (window_ends_at - now).num_milliseconds().max(0);
        // Ceiling so the countdown never shows 0 while still closed.
        (millis + 999) / 1000
    }

    fn evict(&mut self, now: DateTime<Utc>) {
        let cutoff = now - self.window;
        self.accepted.retain(|accepted| *accepted > cutoff);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{RateLimitDecision, SlidingWindowLimiter};

    fn at(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn four_calls_pass_and_the_fifth_is_rejected() {
        let mut limiter = SlidingWindowLimiter::default();

        for call in 0..4 {
            let decision = limiter.check(at(call));
            assert!(
                matches!(decision, RateLimitDecision::Allowed { .. }),
                "call {call} should pass"
            );
        }

        match limiter.check(at(10)) {
            RateLimitDecision::Rejected { window_ends_at } => {
                // Oldest accepted call was at t=0; window reopens at t=60.
                assert_eq!(window_ends_at, at(60));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejected_calls_do_not_consume_a_slot() {
        let mut limiter = SlidingWindowLimiter::default();
        for call in 0..4 {
            limiter.check(at(call));
        }

        // Hammering while closed must not push the reopen time out.
        for attempt in 10..20 {
            assert!(matches!(
                limiter.check(at(attempt)),
                RateLimitDecision::Rejected { window_ends_at } if window_ends_at == at(60)
            ));
        }
    }

    #[test]
    fn window_reopens_after_the_oldest_call_ages_out() {
        let mut limiter = SlidingWindowLimiter::default();
        for call in 0..4 {
            limiter.check(at(call));
        }

        assert!(matches!(limiter.check(at(59)), RateLimitDecision::Rejected { .. }));
        assert!(matches!(limiter.check(at(61)), RateLimitDecision::Allowed { .. }));
    }

    #[test]
    fn countdown_is_positive_while_closed_and_zero_when_open() {
        let mut limiter = SlidingWindowLimiter::default();
        assert_eq!(limiter.seconds_until_reset(at(0)), 0);

        for call in 0..4 {
            limiter.check(at(call));
        }

        assert_eq!(limiter.seconds_until_reset(at(10)), 50);
        assert_eq!(limiter.seconds_until_reset(at(59)), 1);
        assert_eq!(limiter.seconds_until_reset(at(61)), 0);
    }

    #[test]
    fn custom_window_sizes_are_honored() {
        let mut limiter = SlidingWindowLimiter::new(2, Duration::seconds(10));
        assert!(matches!(limiter.check(at(0)), RateLimitDecision::Allowed { remaining: 1 }));
        assert!(matches!(limiter.check(at(1)), RateLimitDecision::Allowed { remaining: 0 }));
        assert!(matches!(limiter.check(at(2)), RateLimitDecision::Rejected { .. }));
        assert!(matches!(limiter.check(at(11)), RateLimitDecision::Allowed { .. }));
    }
}
