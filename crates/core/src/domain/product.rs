use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::store::StoreId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

/// Per-store unit prices for one product. A price of zero means the store
/// does not carry the item; absent fields deserialize to zero for the same
/// reason, so a sparse catalog row never fails to load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorePrices {
    #[serde(default)]
    pub walmart: Decimal,
    #[serde(default)]
    pub heb: Decimal,
    #[serde(default)]
    pub aldi: Decimal,
    #[serde(default)]
    pub target: Decimal,
    #[serde(default)]
    pub kroger: Decimal,
    #[serde(default)]
    pub sams: Decimal,
}

impl StorePrices {
    pub fn get(&self, store: StoreId) -> Decimal {
        match store {
            StoreId::Walmart => self.walmart,
            StoreId::Heb => self.heb,
            StoreId::Aldi => self.aldi,
            StoreId::Target => self.target,
            StoreId::Kroger => self.kroger,
            StoreId::Sams => self.sams,
        }
    }

    pub fn set(&mut self, store: StoreId, price: Decimal) {
        match store {
            StoreId::Walmart => self.walmart = price,
            StoreId::Heb => self.heb = price,
            StoreId::Aldi => self.aldi = price,
            StoreId::Target => self.target = price,
            StoreId::Kroger => self.kroger = price,
            StoreId::Sams => self.sams = price,
        }
    }

    /// True when at least one store carries the item at a positive price.
    pub fn carried_anywhere(&self) -> bool {
        StoreId::ALL.iter().any(|store| self.get(*store) > Decimal::ZERO)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit: String,
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub prices: StorePrices,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{StoreId, StorePrices};

    #[test]
    fn missing_price_fields_default_to_zero() {
        let prices: StorePrices =
            serde_json::from_str(r#"{"walmart": "3.00", "heb": "2.50"}"#).expect("sparse row");
        assert_eq!(prices.get(StoreId::Walmart), dec!(3.00));
        assert_eq!(prices.get(StoreId::Heb), dec!(2.50));
        assert_eq!(prices.get(StoreId::Aldi), dec!(0));
        assert_eq!(prices.get(StoreId::Sams), dec!(0));
    }

    #[test]
    fn carried_anywhere_ignores_zero_prices() {
        let mut prices = StorePrices::default();
        assert!(!prices.carried_anywhere());
        prices.set(StoreId::Kroger, dec!(1.25));
        assert!(prices.carried_anywhere());
    }
}
