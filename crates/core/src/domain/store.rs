use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The six retailers every price comparison runs against.
///
/// `ALL` preserves the canonical input order; the totals calculator relies on
/// it for stable tie-breaking when two stores land on the same total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreId {
    Walmart,
    Heb,
    Aldi,
    Target,
    Kroger,
    Sams,
}

impl StoreId {
    pub const ALL: [StoreId; 6] = [
        StoreId::Walmart,
        StoreId::Heb,
        StoreId::Aldi,
        StoreId::Target,
        StoreId::Kroger,
        StoreId::Sams,
    ];

    /// Wire key used in catalog payloads and price fields.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Walmart => "walmart",
            Self::Heb => "heb",
            Self::Aldi => "aldi",
            Self::Target => "target",
            Self::Kroger => "kroger",
            Self::Sams => "sams",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Walmart => "Walmart",
            Self::Heb => "H-E-B",
            Self::Aldi => "Aldi",
            Self::Target => "Target",
            Self::Kroger => "Kroger",
            Self::Sams => "Sam's Club",
        }
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for StoreId {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "walmart" => Ok(Self::Walmart),
            "heb" | "h-e-b" => Ok(Self::Heb),
            "aldi" => Ok(Self::Aldi),
            "target" => Ok(Self::Target),
            "kroger" => Ok(Self::Kroger),
            "sams" | "sam's club" => Ok(Self::Sams),
            other => Err(DomainError::UnknownStore(other.to_string())),
        }
    }
}

/// How the order reaches the customer. Selected once per cart-review session
/// and drives which fee rules apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentMode {
    Pickup,
    Delivery,
    // Wire form matches the storefront's value and `label()`.
    #[serde(rename = "instore")]
    InStore,
}

impl FulfillmentMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
            Self::InStore => "instore",
        }
    }
}

impl std::str::FromStr for FulfillmentMode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pickup" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            "instore" | "in_store" | "in-store" => Ok(Self::InStore),
            other => Err(DomainError::UnknownFulfillmentMode(other.to_string())),
        }
    }
}
