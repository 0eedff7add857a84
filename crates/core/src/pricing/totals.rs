use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;
use crate::domain::store::{FulfillmentMode, StoreId};
use crate::pricing::fees::fee_rule;

/// Flat sales tax applied to every store subtotal. Not geography-aware.
pub const TAX_RATE: Decimal = dec!(0.0875);

/// One store's priced-out cart. Monetary fields are rounded to the cent
/// exactly once, when the value is built; `total == subtotal + tax_and_fees`
/// holds on the rounded figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTotal {
    pub store: StoreId,
    pub display_name: String,
    pub subtotal: Decimal,
    pub tax_and_fees: Decimal,
    pub total: Decimal,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Prices the cart at every retailer for the given fulfillment mode.
///
/// Intermediate math stays unrounded; rounding happens once at output. The
/// result is sorted ascending by total, ties kept in canonical store order.
/// An empty cart yields an empty list.
pub fn compute_store_totals(cart: &[CartLine], mode: FulfillmentMode) -> Vec<StoreTotal> {
    if cart.is_empty() {
        return Vec::new();
    }

    let mut totals = StoreId::ALL
        .iter()
        .map(|store| {
            let subtotal: Decimal = cart.iter().map(|line| line.line_total(*store)).sum();
            let tax = subtotal * TAX_RATE;
            let fee = fee_rule(*store, mode).apply(subtotal);

            let subtotal_out = round_money(subtotal);
            let tax_and_fees = round_money(tax + fee);

            StoreTotal {
                store: *store,
                display_name: store.display_name().to_string(),
                subtotal: subtotal_out,
                tax_and_fees,
                total: subtotal_out + tax_and_fees,
            }
        })
        .collect::<Vec<_>>();

    // Stable sort keeps canonical store order on equal totals.
    totals.sort_by(|a, b| a.total.cmp(&b.total));
    totals
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::domain::cart::{Cart, CartLine};
    use crate::domain::product::{Product, ProductId, StorePrices};
    use crate::domain::store::{FulfillmentMode, StoreId};

    use super::compute_store_totals;

    fn line(id: &str, quantity: u32, prices: StorePrices) -> CartLine {
        CartLine::new(
            Product {
                id: ProductId(id.to_string()),
                name: id.to_string(),
                unit: "each".to_string(),
                category: None,
                image_url: None,
                prices,
            },
            quantity,
        )
    }

    #[test]
    fn empty_cart_yields_no_totals() {
        assert!(compute_store_totals(&[], FulfillmentMode::Pickup).is_empty());
        assert!(compute_store_totals(&[], FulfillmentMode::Delivery).is_empty());
        assert!(compute_store_totals(&[], FulfillmentMode::InStore).is_empty());
    }

    #[test]
    fn pickup_scenario_rounds_at_output_and_ranks_heb_first() {
        // Item A: qty 2, walmart $3.00, heb $2.50, not carried elsewhere.
        let cart = vec![line(
            "item-a",
            2,
            StorePrices { walmart: dec!(3.00), heb: dec!(2.50), ..StorePrices::default() },
        )];

        let totals = compute_store_totals(&cart, FulfillmentMode::Pickup);
        assert_eq!(totals.len(), 6);

        let heb = totals.iter().find(|t| t.store == StoreId::Heb).expect("heb priced");
        let walmart = totals.iter().find(|t| t.store == StoreId::Walmart).expect("walmart priced");

        // H-E-B: 5.00 + 0.4375 tax, no fee -> 5.44 rounded.
        assert_eq!(heb.subtotal, dec!(5.00));
        assert_eq!(heb.tax_and_fees, dec!(0.44));
        assert_eq!(heb.total, dec!(5.44));

        // Walmart: 6.00 + 0.525 tax + 1.99 fee = 8.515 -> 8.52 at output.
        assert_eq!(walmart.subtotal, dec!(6.00));
        assert_eq!(walmart.tax_and_fees, dec!(2.52));
        assert_eq!(walmart.total, dec!(8.52));

        assert_eq!(totals.last().map(|t| t.store), Some(StoreId::Walmart));
    }

    #[test]
    fn totals_are_sorted_ascending() {
        let cart = vec![line(
            "item-a",
            3,
            StorePrices {
                walmart: dec!(4.10),
                heb: dec!(3.75),
                aldi: dec!(3.20),
                target: dec!(4.50),
                kroger: dec!(3.90),
                sams: dec!(3.00),
            },
        )];

        for mode in [FulfillmentMode::Pickup, FulfillmentMode::Delivery, FulfillmentMode::InStore] {
            let totals = compute_store_totals(&cart, mode);
            for pair in totals.windows(2) {
                assert!(pair[0].total <= pair[1].total, "not sorted for {mode:?}");
            }
        }
    }

    #[test]
    fn total_identity_holds_to_the_cent() {
        let cart = vec![
            line(
                "item-a",
                2,
                StorePrices { walmart: dec!(3.33), heb: dec!(2.47), ..StorePrices::default() },
            ),
            line(
                "item-b",
                5,
                StorePrices { walmart: dec!(1.01), aldi: dec!(0.89), ..StorePrices::default() },
            ),
        ];

        for mode in [FulfillmentMode::Pickup, FulfillmentMode::Delivery, FulfillmentMode::InStore] {
            for total in compute_store_totals(&cart, mode) {
                assert_eq!(total.total, total.subtotal + total.tax_and_fees);
                assert!(total.total.scale() <= 2);
            }
        }
    }

    #[test]
    fn subtotals_scale_linearly_with_quantity() {
        let prices = StorePrices {
            walmart: dec!(2.19),
            heb: dec!(2.05),
            kroger: dec!(2.29),
            ..StorePrices::default()
        };
        let single = compute_store_totals(&[line("item-a", 3, prices.clone())], FulfillmentMode::InStore);
        let doubled = compute_store_totals(&[line("item-a", 6, prices)], FulfillmentMode::InStore);

        for (one, two) in single.iter().zip(doubled.iter()) {
            assert_eq!(one.store, two.store);
            assert_eq!(one.subtotal * dec!(2), two.subtotal);
        }
    }

    #[test]
    fn ties_keep_canonical_store_order() {
        // All stores priced identically in-store: totals tie across the board.
        let prices = StorePrices {
            walmart: dec!(2.00),
            heb: dec!(2.00),
            aldi: dec!(2.00),
            target: dec!(2.00),
            kroger: dec!(2.00),
            sams: dec!(2.00),
        };
        let totals = compute_store_totals(&[line("item-a", 1, prices)], FulfillmentMode::InStore);
        let order = totals.iter().map(|t| t.store).collect::<Vec<_>>();
        assert_eq!(order, StoreId::ALL.to_vec());
    }

    #[test]
    fn free_delivery_boundary_is_exact() {
        // Subtotal exactly $35.00 at Walmart delivery: fee waived.
        let at_threshold = vec![line(
            "item-a",
            1,
            StorePrices { walmart: dec!(35.00), ..StorePrices::default() },
        )];
        let below = vec![line(
            "item-a",
            1,
            StorePrices { walmart: dec!(34.99), ..StorePrices::default() },
        )];

        let waived = compute_store_totals(&at_threshold, FulfillmentMode::Delivery);
        let charged = compute_store_totals(&below, FulfillmentMode::Delivery);

        let waived_walmart = waived.iter().find(|t| t.store == StoreId::Walmart).unwrap();
        let charged_walmart = charged.iter().find(|t| t.store == StoreId::Walmart).unwrap();

        // 35.00 * 0.0875 = 3.0625 -> 3.06; no fee.
        assert_eq!(waived_walmart.tax_and_fees, dec!(3.06));
        // 34.99 * 0.0875 = 3.061625 -> + 7.95 fee = 11.011625 -> 11.01.
        assert_eq!(charged_walmart.tax_and_fees, dec!(11.01));
    }

    #[test]
    fn cart_snapshot_is_not_affected_by_later_mutation() {
        let mut cart = Cart::new();
        cart.add(
            Product {
                id: ProductId("item-a".to_string()),
                name: "item-a".to_string(),
                unit: "each".to_string(),
                category: None,
                image_url: None,
                prices: StorePrices { heb: dec!(2.50), ..StorePrices::default() },
            },
            2,
        );

        let snapshot = cart.lines().to_vec();
        cart.set_quantity(&ProductId("item-a".to_string()), 9);

        let totals = compute_store_totals(&snapshot, FulfillmentMode::InStore);
        let heb = totals.iter().find(|t| t.store == StoreId::Heb).unwrap();
        assert_eq!(heb.subtotal, dec!(5.00));
    }
}
