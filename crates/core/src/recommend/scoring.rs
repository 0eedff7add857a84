//! Weighted composite scoring for store recommendations.

use rand::Rng;

use crate::domain::store::{FulfillmentMode, StoreId};
use crate::quality::{quality_profile, QualityProfile};
use crate::pricing::StoreTotal;

/// Point budget per scoring component. Defaults total 100 before jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Max points for price rank (cheapest gets the full amount).
    pub price_rank: f64,
    /// Max points from the 0-5 review score.
    pub reviews: f64,
    /// Max points from the fulfillment-mode bonus.
    pub mode_bonus: f64,
    /// Max points from the freshness/availability/service composite.
    pub quality: f64,
    /// Upper bound on the random tie-breaking addend.
    pub jitter: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { price_rank: 40.0, reviews: 25.0, mode_bonus: 20.0, quality: 15.0, jitter: 5.0 }
    }
}

/// Source of the bounded random addend. Production uses thread-local
/// entropy; tests inject a fixed source so winners are deterministic.
pub trait JitterSource {
    /// Returns a value in `[0, 1)`.
    fn sample(&mut self) -> f64;
}

#[derive(Debug, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn sample(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same fraction; jitter then never flips a winner.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredStore {
    pub total: StoreTotal,
    pub profile: &'static QualityProfile,
    /// Rank in the price-sorted input, zero is cheapest.
    pub price_rank: usize,
    pub score: f64,
}

/// Price rank bonus: cheapest 40, runner-up 35, third 25, then a fading
/// tail that bottoms out at zero.
pub fn price_rank_bonus(rank: usize, weights: &ScoringWeights) -> f64 {
    match rank {
        0 => weights.price_rank,
        1 => 35.0,
        2 => 25.0,
        rank => (20.0 - rank as f64 * 5.0).max(0.0),
    }
}

/// Channel-specific service bonus. Stores without an explicit entry get the
/// baseline for that mode.
pub fn mode_bonus(store: StoreId, mode: FulfillmentMode) -> f64 {
    match mode {
        FulfillmentMode::Pickup => match store {
            StoreId::Heb => 20.0,
            StoreId::Target => 15.0,
            _ => 10.0,
        },
        FulfillmentMode::Delivery => match store {
            StoreId::Walmart => 18.0,
            StoreId::Target => 16.0,
            _ => 12.0,
        },
        FulfillmentMode::InStore => 15.0,
    }
}

/// Scores every store in the price-sorted totals list.
pub fn score_stores<J: JitterSource>(
    totals: &[StoreTotal],
    mode: FulfillmentMode,
    weights: &ScoringWeights,
    jitter: &mut J,
) -> Vec<ScoredStore> {
    totals
        .iter()
        .enumerate()
        .map(|(rank, total)| {
            let profile = quality_profile(total.store);

            let mut score = price_rank_bonus(rank, weights);
            score += profile.review_score / 5.0 * weights.reviews;
            score += mode_bonus(total.store, mode);
            score += profile.composite() / 5.0 * weights.quality;
            score += jitter.sample() * weights.jitter;

            ScoredStore { total: total.clone(), profile, price_rank: rank, score }
        })
        .collect()
}
