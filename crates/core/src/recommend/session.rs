//! Compute-once recommendation lifecycle.
//!
//! A recommendation shown to the user stays stable for the rest of the
//! session even if the cart changes afterwards. The session is an explicit
//! state machine (unset -> frozen -> reset) guarded by the cart+mode
//! identity that produced the frozen value; nothing depends on call order
//! side effects.

use serde::Serialize;

use crate::domain::cart::Cart;
use crate::domain::store::FulfillmentMode;
use crate::pricing::compute_store_totals;
use crate::recommend::{JitterSource, Recommendation, RecommendationEngine};

/// Identity of the computation pass a frozen recommendation came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PassKey {
    pub mode: FulfillmentMode,
    pub cart_fingerprint: String,
}

impl PassKey {
    pub fn new(cart: &Cart, mode: FulfillmentMode) -> Self {
        Self { mode, cart_fingerprint: cart.fingerprint() }
    }
}

#[derive(Clone, Debug, Default)]
enum SessionState {
    #[default]
    Unset,
    Frozen { key: PassKey, recommendation: Recommendation },
}

#[derive(Clone, Debug, Default)]
pub struct RecommendationSession {
    state: SessionState,
}

impl RecommendationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes a recommendation on the first call and returns the frozen
    /// value on every later call, regardless of how the cart or mode have
    /// changed since. An empty cart leaves the session unset.
    pub fn recommend_once<J: JitterSource>(
        &mut self,
        cart: &Cart,
        mode: FulfillmentMode,
        engine: &mut RecommendationEngine<J>,
    ) -> Option<&Recommendation> {
        if matches!(self.state, SessionState::Unset) {
            let totals = compute_store_totals(cart.lines(), mode);
            if let Some(recommendation) = engine.score_and_recommend(&totals, mode) {
                self.state =
                    SessionState::Frozen { key: PassKey::new(cart, mode), recommendation };
            }
        }

        self.current()
    }

    pub fn current(&self) -> Option<&Recommendation> {
        match &self.state {
            SessionState::Unset => None,
            SessionState::Frozen { recommendation, .. } => Some(recommendation),
        }
    }

    /// Inputs the frozen recommendation was computed from.
    pub fn frozen_key(&self) -> Option<&PassKey> {
        match &self.state {
            SessionState::Unset => None,
            SessionState::Frozen { key, .. } => Some(key),
        }
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, SessionState::Frozen { .. })
    }

    /// True when the frozen value no longer matches the live inputs. The
    /// recommendation still does not change; this only lets the UI know the
    /// explanation predates the latest cart edit.
    pub fn is_stale_for(&self, cart: &Cart, mode: FulfillmentMode) -> bool {
        match self.frozen_key() {
            Some(key) => key != &PassKey::new(cart, mode),
            None => false,
        }
    }

    /// Tears the session down. The only path back to recomputation.
    pub fn reset(&mut self) {
        self.state = SessionState::Unset;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::domain::cart::Cart;
    use crate::domain::product::{Product, ProductId, StorePrices};
    use crate::domain::store::FulfillmentMode;
    use crate::recommend::{FixedJitter, RecommendationEngine};

    use super::RecommendationSession;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: id.to_string(),
            unit: "each".to_string(),
            category: None,
            image_url: None,
            prices: StorePrices {
                walmart: dec!(3.00),
                heb: dec!(2.50),
                aldi: dec!(2.75),
                target: dec!(3.10),
                kroger: dec!(2.90),
                sams: dec!(2.60),
            },
        }
    }

    fn engine() -> RecommendationEngine<FixedJitter> {
        RecommendationEngine::new(FixedJitter(0.0))
    }

    #[test]
    fn empty_cart_leaves_the_session_unset() {
        let mut session = RecommendationSession::new();
        let cart = Cart::new();
        assert!(session.recommend_once(&cart, FulfillmentMode::Pickup, &mut engine()).is_none());
        assert!(!session.is_frozen());
    }

    #[test]
    fn first_computation_freezes_the_result() {
        let mut session = RecommendationSession::new();
        let mut cart = Cart::new();
        cart.add(product("milk"), 2);

        let winner = session
            .recommend_once(&cart, FulfillmentMode::Pickup, &mut engine())
            .expect("recommendation")
            .store
            .store;

        assert!(session.is_frozen());
        assert_eq!(session.current().map(|r| r.store.store), Some(winner));
    }

    #[test]
    fn cart_mutation_does_not_change_a_frozen_recommendation() {
        let mut session = RecommendationSession::new();
        let mut cart = Cart::new();
        cart.add(product("milk"), 2);

        let frozen = session
            .recommend_once(&cart, FulfillmentMode::Pickup, &mut engine())
            .expect("recommendation")
            .clone();

        cart.add(product("eggs"), 12);
        cart.set_quantity(&ProductId("milk".to_string()), 7);

        let after = session
            .recommend_once(&cart, FulfillmentMode::Delivery, &mut engine())
            .expect("still frozen");

        assert_eq!(after.store.store, frozen.store.store);
        assert_eq!(after.reason, frozen.reason);
        assert!(session.is_stale_for(&cart, FulfillmentMode::Delivery));
    }

    #[test]
    fn reset_is_the_only_path_to_recomputation() {
        let mut session = RecommendationSession::new();
        let mut cart = Cart::new();
        cart.add(product("milk"), 2);

        session.recommend_once(&cart, FulfillmentMode::Pickup, &mut engine());
        assert!(session.is_frozen());

        session.reset();
        assert!(!session.is_frozen());
        assert!(session.current().is_none());

        let again = session.recommend_once(&cart, FulfillmentMode::Pickup, &mut engine());
        assert!(again.is_some());
    }

    #[test]
    fn frozen_key_records_the_producing_inputs() {
        let mut session = RecommendationSession::new();
        let mut cart = Cart::new();
        cart.add(product("milk"), 2);

        session.recommend_once(&cart, FulfillmentMode::Pickup, &mut engine());
        let key = session.frozen_key().expect("key");
        assert_eq!(key.mode, FulfillmentMode::Pickup);
        assert_eq!(key.cart_fingerprint, cart.fingerprint());
        assert!(!session.is_stale_for(&cart, FulfillmentMode::Pickup));
    }
}
