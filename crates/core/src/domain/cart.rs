use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::domain::store::StoreId;

/// One cart entry: a catalog product joined with a positive quantity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity: quantity.max(1) }
    }

    /// Line contribution to one store's subtotal. Zero-priced stores (item
    /// not carried) contribute zero rather than erroring.
    pub fn line_total(&self, store: StoreId) -> Decimal {
        self.product.prices.get(store) * Decimal::from(self.quantity)
    }
}

/// Session-owned cart. Mutations happen between computation passes; the
/// calculator and scorer only ever see a borrowed snapshot of `lines`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from already-joined lines, e.g. a request payload.
    /// Zero quantities are clamped up to one on the way in.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line.product, line.quantity);
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Adds a product, merging into an existing line for the same product.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.lines.iter_mut().find(|line| line.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::new(product, quantity));
        }
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| &line.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product.id != product_id);
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Stable identity of the cart contents, used to record which inputs a
    /// frozen recommendation was computed from. Order-insensitive so a
    /// reordered cart does not read as a different one.
    pub fn fingerprint(&self) -> String {
        let mut entries = self
            .lines
            .iter()
            .map(|line| format!("{}x{}", line.product.id.0, line.quantity))
            .collect::<Vec<_>>();
        entries.sort();
        entries.join("|")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::domain::product::{Product, ProductId, StorePrices};
    use crate::domain::store::StoreId;

    use super::Cart;

    fn product(id: &str, walmart: rust_decimal::Decimal) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: id.to_string(),
            unit: "each".to_string(),
            category: None,
            image_url: None,
            prices: StorePrices { walmart, ..StorePrices::default() },
        }
    }

    #[test]
    fn add_merges_duplicate_products() {
        let mut cart = Cart::new();
        cart.add(product("milk", dec!(2.50)), 1);
        cart.add(product("milk", dec!(2.50)), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(product("milk", dec!(2.50)), 2);
        cart.set_quantity(&ProductId("milk".to_string()), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn line_total_is_zero_for_stores_not_carrying_the_item() {
        let mut cart = Cart::new();
        cart.add(product("milk", dec!(2.50)), 2);
        assert_eq!(cart.lines()[0].line_total(StoreId::Walmart), dec!(5.00));
        assert_eq!(cart.lines()[0].line_total(StoreId::Aldi), dec!(0));
    }

    #[test]
    fn fingerprint_is_order_insensitive() {
        let mut first = Cart::new();
        first.add(product("milk", dec!(2.50)), 1);
        first.add(product("eggs", dec!(4.00)), 2);

        let mut second = Cart::new();
        second.add(product("eggs", dec!(4.00)), 2);
        second.add(product("milk", dec!(2.50)), 1);

        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn fingerprint_tracks_quantity_changes() {
        let mut cart = Cart::new();
        cart.add(product("milk", dec!(2.50)), 1);
        let before = cart.fingerprint();
        cart.set_quantity(&ProductId("milk".to_string()), 3);
        assert_ne!(before, cart.fingerprint());
    }
}
