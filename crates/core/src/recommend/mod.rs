//! Store recommendation engine: weighted scoring over the price-sorted
//! totals plus the static quality ledger, a priority-ordered reason tree,
//! and the session freeze lifecycle.

pub mod scoring;
pub mod session;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::store::FulfillmentMode;
use crate::pricing::StoreTotal;
use crate::quality::QualityProfile;

pub use scoring::{
    mode_bonus, price_rank_bonus, score_stores, FixedJitter, JitterSource, ScoredStore,
    ScoringWeights, ThreadRngJitter,
};
pub use session::{PassKey, RecommendationSession};

/// Displayed confidence. A deliberate product constant, not derived from
/// the score spread.
pub const CONFIDENCE: u8 = 97;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub store: StoreTotal,
    pub quality: QualityProfile,
    pub reason: String,
    pub confidence: u8,
    /// Premium over the cheapest store; `None` when the winner is cheapest.
    pub savings_vs_cheapest: Option<Decimal>,
    pub is_cheapest: bool,
}

impl Recommendation {
    /// Savings line for the UI, e.g. `$1.23 more than cheapest`.
    pub fn savings_text(&self) -> Option<String> {
        self.savings_vs_cheapest.map(|delta| format!("${delta} more than cheapest"))
    }
}

pub struct RecommendationEngine<J: JitterSource = ThreadRngJitter> {
    weights: ScoringWeights,
    jitter: J,
}

impl Default for RecommendationEngine<ThreadRngJitter> {
    fn default() -> Self {
        Self::new(ThreadRngJitter)
    }
}

impl<J: JitterSource> RecommendationEngine<J> {
    pub fn new(jitter: J) -> Self {
        Self { weights: ScoringWeights::default(), jitter }
    }

    pub fn with_weights(jitter: J, weights: ScoringWeights) -> Self {
        Self { weights, jitter }
    }

    /// Scores every store and picks the winner.
    ///
    /// `totals` must be the calculator's output (ascending by total); the
    /// cheapest store is `totals[0]`. Exact score ties keep the first
    /// store encountered. Empty input yields no recommendation.
    pub fn score_and_recommend(
        &mut self,
        totals: &[StoreTotal],
        mode: FulfillmentMode,
    ) -> Option<Recommendation> {
        let scored = score_stores(totals, mode, &self.weights, &mut self.jitter);
        let winner = scored.iter().fold(None::<&ScoredStore>, |best, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })?;

        let cheapest = &totals[0];
        let is_cheapest = winner.total.store == cheapest.store;
        let delta = winner.total.total - cheapest.total;

        Some(Recommendation {
            reason: reason_text(is_cheapest, winner.profile),
            store: winner.total.clone(),
            quality: winner.profile.clone(),
            confidence: CONFIDENCE,
            savings_vs_cheapest: (!is_cheapest).then_some(delta),
            is_cheapest,
        })
    }
}

/// Picks the recommendation justification. Branches are evaluated in
/// priority order; the first match wins.
fn reason_text(is_cheapest: bool, profile: &QualityProfile) -> String {
    if is_cheapest && profile.review_score > 4.0 && profile.freshness > 4.0 {
        format!(
            "offers the best overall value with excellent reviews ({}★) and freshness ({}★)",
            profile.review_score, profile.freshness
        )
    } else if profile.freshness >= 4.5 {
        format!(
            "is highly recommended for its exceptional freshness ({}★), perfect for produce lovers",
            profile.freshness
        )
    } else if profile.availability >= 4.5 {
        format!(
            "has outstanding item availability ({}★), so you're likely to find everything on your list",
            profile.availability
        )
    } else if profile.review_score >= 4.4 && !is_cheapest {
        format!(
            "is worth the slight premium for its superior product quality and customer ratings ({}★)",
            profile.review_score
        )
    } else if is_cheapest {
        format!(
            "is the most affordable option, while maintaining a reasonable quality rating of {}★",
            profile.review_score
        )
    } else {
        format!(
            "provides an optimal balance of price and quality, with a solid {}★ review score",
            profile.review_score
        )
    }
}
