pub mod fees;
pub mod totals;

pub use fees::{fee_rule, FeeRule};
pub use totals::{compute_store_totals, StoreTotal, TAX_RATE};
