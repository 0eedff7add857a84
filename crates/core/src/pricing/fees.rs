use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::store::{FulfillmentMode, StoreId};

/// Declarative fee rule, evaluated against the store subtotal.
///
/// The whole schedule lives in [`fee_rule`] as one table keyed by
/// (store, mode), so a fee change is a one-line edit and every rule goes
/// through the same `apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeRule {
    Free,
    Flat { fee: Decimal },
    /// Fee waived once the subtotal reaches the threshold (inclusive).
    WaivedAbove { threshold: Decimal, fee: Decimal },
}

impl FeeRule {
    pub fn apply(&self, subtotal: Decimal) -> Decimal {
        match self {
            Self::Free => Decimal::ZERO,
            Self::Flat { fee } => *fee,
            Self::WaivedAbove { threshold, fee } => {
                if subtotal >= *threshold {
                    Decimal::ZERO
                } else {
                    *fee
                }
            }
        }
    }
}

/// Full fee schedule. In-store shopping carries no fee at any retailer.
pub fn fee_rule(store: StoreId, mode: FulfillmentMode) -> FeeRule {
    use FulfillmentMode::*;
    use StoreId::*;

    match (store, mode) {
        (_, InStore) => FeeRule::Free,

        (Walmart, Pickup) => FeeRule::Flat { fee: dec!(1.99) },
        (Sams, Pickup) => FeeRule::WaivedAbove { threshold: dec!(50), fee: dec!(4.99) },
        (Heb | Aldi | Kroger | Target, Pickup) => FeeRule::Free,

        (Walmart, Delivery) => FeeRule::WaivedAbove { threshold: dec!(35), fee: dec!(7.95) },
        (Sams, Delivery) => FeeRule::WaivedAbove { threshold: dec!(50), fee: dec!(12.00) },
        (Heb, Delivery) => FeeRule::Flat { fee: dec!(4.95) },
        (Aldi, Delivery) => FeeRule::WaivedAbove { threshold: dec!(35), fee: dec!(3.99) },
        (Kroger, Delivery) => FeeRule::WaivedAbove { threshold: dec!(35), fee: dec!(4.95) },
        (Target, Delivery) => FeeRule::WaivedAbove { threshold: dec!(35), fee: dec!(9.99) },
    }
}
