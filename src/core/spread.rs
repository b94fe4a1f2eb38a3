use crate::models::{PriceRange, Quote};

/// Symmetric band around a gage: `spread = floor(gage * pct)`.
///
/// `derive_price_range(1000, 0.2)` is 800..1200.
#[inline]
pub fn derive_price_range(gage: u32, spread_pct: f64) -> PriceRange {
    let spread = (gage as f64 * spread_pct).floor() as u32;
    PriceRange {
        min: gage.saturating_sub(spread),
        max: gage.saturating_add(spread),
    }
}

/// Widen a point total into the displayed quote, truncating toward zero.
#[inline]
pub fn display_range(total: f64, spread_pct: f64) -> Quote {
    Quote {
        min_total: (total * (1.0 - spread_pct)) as i64,
        max_total: (total * (1.0 + spread_pct)) as i64,
    }
}
