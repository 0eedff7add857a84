//! Chat orchestration: rate limiting, prompt assembly, completion, and
//! fallback substitution.

use std::collections::HashMap;
use std::sync::Mutex;

use cartwheel_core::ratelimit::{RateLimitDecision, SlidingWindowLimiter};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::llm::LlmClient;
use crate::prompt::ChatContext;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssistantReply {
    Answer {
        text: String,
        /// True when the downstream service failed and `text` is the
        /// variant's canned fallback rather than a generated answer.
        degraded: bool,
    },
    /// First-class rejected state, not a failure: the caller shows a
    /// countdown instead of an error.
    RateLimited { seconds_until_reset: i64 },
}

pub struct ChatAssistant<C> {
    client: C,
    max_requests: usize,
    window: Duration,
    // One limiter per chat session, keyed by the caller's opaque id.
    limiters: Mutex<HashMap<String, SlidingWindowLimiter>>,
}

impl<C: LlmClient> ChatAssistant<C> {
    pub fn new(client: C) -> Self {
        Self::with_rate_limit(client, 4, Duration::seconds(60))
    }

    pub fn with_rate_limit(client: C, max_requests: usize, window: Duration) -> Self {
        Self { client, max_requests, window, limiters: Mutex::new(HashMap::new()) }
    }

    /// Handles one user message end to end.
    ///
    /// The rate limiter is consulted first so a rejected call never reaches
    /// the network. Downstream failures degrade to the variant's static
    /// fallback; the typed error stays internal.
    pub async fn respond(
        &self,
        session_id: &str,
        context: &ChatContext,
        user_message: &str,
        now: DateTime<Utc>,
    ) -> AssistantReply {
        if let Some(seconds) = self.check_rate_limit(session_id, now) {
            return AssistantReply::RateLimited { seconds_until_reset: seconds };
        }

        let prompt = context.build_prompt(user_message);
        match self.client.complete(&prompt).await {
            Ok(text) => AssistantReply::Answer { text, degraded: false },
            Err(_error) => AssistantReply::Answer {
                text: context.fallback_message().to_string(),
                degraded: true,
            },
        }
    }

    /// Countdown for a session without consuming a slot.
    pub fn seconds_until_reset(&self, session_id: &str, now: DateTime<Utc>) -> i64 {
        let limiters = self.limiters.lock().expect("limiter lock poisoned");
        limiters.get(session_id).map(|limiter| limiter.seconds_until_reset(now)).unwrap_or(0)
    }

    /// Drops a session's limiter state when the owning chat session ends.
    pub fn end_session(&self, session_id: &str) {
        let mut limiters = self.limiters.lock().expect("limiter lock poisoned");
        limiters.remove(session_id);
    }

    fn check_rate_limit(&self, session_id: &str, now: DateTime<Utc>) -> Option<i64> {
        let mut limiters = self.limiters.lock().expect("limiter lock poisoned");
        let limiter = limiters
            .entry(session_id.to_string())
            .or_insert_with(|| SlidingWindowLimiter::new(self.max_requests, self.window));

        match limiter.check(now) {
            RateLimitDecision::Allowed { .. } => None,
            RateLimitDecision::Rejected { .. } => Some(limiter.seconds_until_reset(now).max(1)),
        }
    }

    /// Exposes the underlying client for callers that need a raw completion.
    pub fn client(&self) -> &C {
        &self.client
    }
}
