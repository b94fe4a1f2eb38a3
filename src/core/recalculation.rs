use tracing::{debug, info};

use crate::config::GageSettings;
use crate::core::gage::compute_gage;
use crate::core::spread::derive_price_range;
use crate::models::{PerformerProfile, PriceRange};

/// Outcome of re-scoring one performer against their stored gage.
#[derive(Debug, Clone, PartialEq)]
pub struct Recalculation {
    pub old_gage: Option<u32>,
    pub new_gage: u32,
    pub updated: bool,
    /// New advertised range. Only set when the gage changed and no override
    /// pins the range.
    pub price_range: Option<PriceRange>,
}

/// Compare a freshly computed gage with the stored one.
///
/// The caller decides whether to persist; nothing here has state.
pub fn recalculate(
    stored_gage: Option<u32>,
    profile: &PerformerProfile,
    settings: &GageSettings,
) -> Recalculation {
    let new_gage = compute_gage(profile, settings).gage;
    let updated = stored_gage != Some(new_gage);

    let price_range = if updated && profile.active_override().is_none() {
        Some(derive_price_range(new_gage, settings.price_spread_pct))
    } else {
        None
    };

    Recalculation {
        old_gage: stored_gage,
        new_gage,
        updated,
        price_range,
    }
}

/// Summary of a batch recalculation, keyed by the caller's record ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RecalculationSummary<K> {
    pub total: usize,
    pub updated: usize,
    pub results: Vec<(K, Recalculation)>,
}

/// Re-score many performers at once.
pub fn recalculate_all<K, I>(records: I, settings: &GageSettings) -> RecalculationSummary<K>
where
    I: IntoIterator<Item = (K, Option<u32>, PerformerProfile)>,
{
    let results: Vec<(K, Recalculation)> = records
        .into_iter()
        .map(|(id, stored_gage, profile)| (id, recalculate(stored_gage, &profile, settings)))
        .collect();

    let updated = results.iter().filter(|(_, r)| r.updated).count();
    info!(total = results.len(), updated, "Recalculated gages");

    RecalculationSummary {
        total: results.len(),
        updated,
        results,
    }
}

/// Effect of setting or clearing an admin override.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideOutcome {
    pub admin_gage_override: Option<u32>,
    /// Freshly scored gage, only computed when the override is cleared.
    pub calculated_gage: Option<u32>,
    pub price_range: PriceRange,
}

/// Set (`Some`) or clear (`None`/zero) the override on a performer.
///
/// Setting pins the advertised range to the override; clearing re-scores the
/// criteria and derives the range from the result.
pub fn apply_override(
    profile: &PerformerProfile,
    override_gage: Option<u32>,
    settings: &GageSettings,
) -> OverrideOutcome {
    match override_gage.filter(|g| *g > 0) {
        Some(gage) => {
            debug!(gage, "Pinning price range to admin override");
            OverrideOutcome {
                admin_gage_override: Some(gage),
                calculated_gage: None,
                price_range: derive_price_range(gage, settings.price_spread_pct),
            }
        }
        None => {
            let cleared = PerformerProfile {
                admin_gage_override: None,
                ..profile.clone()
            };
            let gage = compute_gage(&cleared, settings).gage;
            debug!(gage, "Override cleared, re-scored gage");
            OverrideOutcome {
                admin_gage_override: None,
                calculated_gage: Some(gage),
                price_range: derive_price_range(gage, settings.price_spread_pct),
            }
        }
    }
}
