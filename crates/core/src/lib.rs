pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod health;
pub mod pricing;
pub mod quality;
pub mod ratelimit;
pub mod recommend;

pub use catalog::{CatalogSource, InMemoryCatalog};
pub use domain::cart::{Cart, CartLine};
pub use domain::product::{Category, Product, ProductId, StorePrices};
pub use domain::store::{FulfillmentMode, StoreId};
pub use errors::DomainError;
pub use health::{health_score, HealthBand, HealthScore};
pub use pricing::{compute_store_totals, fee_rule, FeeRule, StoreTotal, TAX_RATE};
pub use quality::{quality_profile, QualityProfile};
pub use ratelimit::{RateLimitDecision, SlidingWindowLimiter};
pub use recommend::{
    FixedJitter, JitterSource, PassKey, Recommendation, RecommendationEngine,
    RecommendationSession, ScoringWeights, ThreadRngJitter, CONFIDENCE,
};
