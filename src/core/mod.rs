// Core algorithm exports
pub mod gage;
pub mod location;
pub mod quote;
pub mod recalculation;
pub mod spread;

pub use gage::{compute_gage, GageEngine, GageWeights, GAGE_WEIGHTS};
pub use location::{city_token, is_local_market};
pub use quote::{compute_quote, compute_quote_breakdown, resolve_performers, QuoteEngine};
pub use recalculation::{
    apply_override, recalculate, recalculate_all, OverrideOutcome, Recalculation,
    RecalculationSummary,
};
pub use spread::{derive_price_range, display_range};
