//! Cart health score: how much of the cart is produce.
//!
//! The score follows a fixed step table over the produce quantity rather
//! than a ratio, so adding a single vegetable to a junk-food cart gives a
//! visible jump. The dietary chat variant reuses the produce share.

use serde::Serialize;

use crate::domain::cart::{Cart, CartLine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl HealthBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Self::Excellent,
            70.. => Self::Good,
            50.. => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub score: u8,
    pub band: HealthBand,
    pub produce_quantity: u32,
    pub total_quantity: u32,
}

/// An item counts as produce by category (produce/fruits/vegetables) or by
/// an "organic" product name.
pub fn is_produce(line: &CartLine) -> bool {
    let category = line
        .product
        .category
        .as_ref()
        .map(|category| category.name.to_lowercase())
        .unwrap_or_default();
    let name = line.product.name.to_lowercase();

    category.contains("produce")
        || category.contains("fruits")
        || category.contains("vegetables")
        || name.contains("organic")
}

pub fn health_score(cart: &Cart) -> HealthScore {
    let total_quantity = cart.total_quantity();
    let produce_quantity =
        cart.lines().iter().filter(|line| is_produce(line)).map(|line| line.quantity).sum::<u32>();

    let score = if total_quantity == 0 {
        0
    } else if produce_quantity == total_quantity {
        100
    } else {
        match produce_quantity {
            0 => 20,
            1 => 44,
            2 => 57,
            3 => 70,
            4 => 81,
            5 => 92,
            6 => 98,
            _ => 100,
        }
    };

    HealthScore { score, band: HealthBand::from_score(score), produce_quantity, total_quantity }
}
