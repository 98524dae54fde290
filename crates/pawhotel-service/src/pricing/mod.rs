//! Day counts, totals, early-checkout recalculation, and default rates.

pub mod rates;
pub mod totals;

pub use rates::RateCard;
pub use totals::{Totals, compute_totals, recompute_for_early_checkout};
