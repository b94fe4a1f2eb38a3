use tracing::{debug, trace};

use crate::config::QuoteSettings;
use crate::core::location::is_local_market;
use crate::core::spread::display_range;
use crate::models::{EventType, Quote, QuoteBreakdown, QuoteRequest, TeamSize, TeamTier};

/// Quote a booking as a `(min, max)` price range
///
/// Pricing pipeline:
/// 1. Floor: `base_min`, discounted for private parties, never above `base_max`
/// 2. Event scores, each 0-1, averaged with equal weight:
///    event type, guest count, show duration, outdoor, weekend
/// 3. Base price interpolated between floor and `base_max` by that average
/// 4. Agency fee applied multiplicatively
/// 5. Flat surcharges added: technical, distance, local market, travel
/// 6. Displayed as total -20% .. +20%
pub fn compute_quote(request: &QuoteRequest, settings: &QuoteSettings) -> Quote {
    compute_quote_breakdown(request, settings).quote
}

/// Same as [`compute_quote`], keeping every intermediate value.
pub fn compute_quote_breakdown(request: &QuoteRequest, settings: &QuoteSettings) -> QuoteBreakdown {
    let min_floor = min_floor(request, settings);
    let performers = resolve_performers(request.team_count, request.team_size);

    let event_type_score = event_type_score(&request.event_type);
    let guests_score = guests_score(request.num_guests);
    let duration_score = duration_score(request.duration_minutes);
    let outdoor_score = if request.is_indoor { 0.0 } else { 1.0 };
    let weekend_score = if request.is_weekend { 1.0 } else { 0.0 };

    // Equal weighting, unlike the gage weights.
    let composite_score =
        (event_type_score + guests_score + duration_score + outdoor_score + weekend_score) / 5.0;

    let base_price = min_floor + composite_score * (request.base_max - min_floor);
    let fee_adjusted = base_price * (1.0 + request.agency_fee_percent / 100.0);

    let tech_items = request.needs_light as u8 + request.needs_sound as u8;
    let tech_fee = settings.tech_fee_per_item * tech_items as f64;
    let distance_surcharge = distance_surcharge(request.distance_km, settings);
    let local_adjustment =
        if is_local_market(request.event_address.as_deref(), &settings.local_cities) {
            -settings.local_market_discount
        } else {
            0.0
        };
    let travel_fee = request.distance_km * settings.rate_per_km * performers as f64;

    // A local discount on a tiny base price must not produce a negative quote.
    let total = (fee_adjusted + tech_fee + distance_surcharge + local_adjustment + travel_fee)
        .max(0.0);
    let quote = display_range(total, settings.display_spread_pct);

    debug!(
        composite_score,
        base_price,
        total,
        min_total = quote.min_total,
        max_total = quote.max_total,
        "Computed quote"
    );

    QuoteBreakdown {
        min_floor,
        performers,
        event_type_score,
        guests_score,
        duration_score,
        outdoor_score,
        weekend_score,
        composite_score,
        base_price,
        fee_adjusted,
        tech_fee,
        distance_surcharge,
        local_adjustment,
        travel_fee,
        total,
        quote,
    }
}

/// Quoter holding its constants.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    settings: QuoteSettings,
}

impl QuoteEngine {
    pub fn new(settings: QuoteSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &QuoteSettings {
        &self.settings
    }

    pub fn quote(&self, request: &QuoteRequest) -> Quote {
        compute_quote(request, &self.settings)
    }

    pub fn breakdown(&self, request: &QuoteRequest) -> QuoteBreakdown {
        compute_quote_breakdown(request, &self.settings)
    }
}

fn min_floor(request: &QuoteRequest, settings: &QuoteSettings) -> f64 {
    let floor = if request.event_type == EventType::PrivateParty {
        request.base_min * settings.private_min_factor
    } else {
        request.base_min
    };

    if floor > request.base_max {
        trace!(floor, base_max = request.base_max, "Clamping min floor to base_max");
        request.base_max
    } else {
        floor
    }
}

/// Number of performers travelling. An explicit count wins over the team size.
pub fn resolve_performers(team_count: Option<i64>, team_size: TeamSize) -> u32 {
    let count = match (team_count, team_size) {
        (Some(count), _) | (None, TeamSize::Count(count)) => count,
        (None, TeamSize::Tier(tier)) => match tier {
            TeamTier::Solo | TeamTier::Unknown => 1,
            TeamTier::Duo => 2,
            TeamTier::Trio => 3,
            TeamTier::Quartet => 4,
        },
    };
    u32::try_from(count.max(1)).unwrap_or(u32::MAX)
}

#[inline]
pub fn event_type_score(event_type: &EventType) -> f64 {
    match event_type {
        EventType::PrivateParty => 0.0,
        EventType::CorporateEvent => 1.0,
        EventType::TeamEvent => 0.7,
        EventType::StreetShow => 0.3,
        EventType::Other(_) => 0.5,
    }
}

#[inline]
pub fn guests_score(num_guests: u32) -> f64 {
    match num_guests {
        0..=200 => 0.0,
        201..=500 => 0.5,
        _ => 1.0,
    }
}

/// Linear from 5 minutes (0.0) to 45 minutes (1.0), clamped outside.
#[inline]
pub fn duration_score(duration_minutes: f64) -> f64 {
    (duration_minutes.clamp(5.0, 45.0) - 5.0) / 40.0
}

fn distance_surcharge(distance_km: f64, settings: &QuoteSettings) -> f64 {
    if distance_km >= settings.long_distance_km {
        settings.long_distance_surcharge
    } else if distance_km >= settings.mid_distance_km {
        settings.mid_distance_surcharge
    } else {
        0.0
    }
}
