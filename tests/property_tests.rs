// Property tests for the pricing engines

use pepe_pricing::config::{GageSettings, QuoteSettings};
use pepe_pricing::core::{compute_gage, compute_quote};
use pepe_pricing::models::{
    AwardsLevel, EmploymentType, EventType, PerformerProfile, QuoteRequest, StageExperience,
    TeamSize, TeamTier,
};
use proptest::prelude::*;

const EXPERIENCE: [StageExperience; 5] = [
    StageExperience::Unknown,
    StageExperience::UpToTwo,
    StageExperience::ThreeToFive,
    StageExperience::SixToTen,
    StageExperience::MoreThanTen,
];

const EMPLOYMENT: [EmploymentType; 4] = [
    EmploymentType::Unknown,
    EmploymentType::Hobby,
    EmploymentType::PartTime,
    EmploymentType::FullTime,
];

const AWARDS: [AwardsLevel; 6] = [
    AwardsLevel::Unknown,
    AwardsLevel::None,
    AwardsLevel::Local,
    AwardsLevel::Regional,
    AwardsLevel::National,
    AwardsLevel::International,
];

// Tiers are listed worst to best, so a higher index is a better tier.
fn profile_strategy() -> impl Strategy<Value = (usize, bool, usize, usize, u32, bool)> {
    (0..5usize, any::<bool>(), 0..4usize, 0..6usize, 0..20u32, any::<bool>())
}

fn build_profile(
    (exp, edu, emp, awards, years, exclusive): (usize, bool, usize, usize, u32, bool),
) -> PerformerProfile {
    PerformerProfile {
        stage_experience: EXPERIENCE[exp],
        circus_education: edu,
        employment_type: EMPLOYMENT[emp],
        awards_level: AWARDS[awards],
        pepe_years: years,
        pepe_exclusivity: exclusive,
        admin_gage_override: None,
    }
}

fn event_type_strategy() -> impl Strategy<Value = EventType> {
    prop_oneof![
        Just(EventType::PrivateParty),
        Just(EventType::CorporateEvent),
        Just(EventType::TeamEvent),
        Just(EventType::StreetShow),
        "[a-z]{3,10}".prop_map(EventType::Other),
    ]
}

proptest! {
    #[test]
    fn gage_stays_in_range_and_on_grid(raw in profile_strategy()) {
        let settings = GageSettings::default();
        let gage = compute_gage(&build_profile(raw), &settings).gage;

        prop_assert!(gage >= settings.base_min && gage <= settings.base_max);
        prop_assert_eq!(gage % settings.rounding_unit, 0);
    }

    #[test]
    fn better_tier_never_lowers_gage(raw in profile_strategy(), field in 0..6usize) {
        let settings = GageSettings::default();
        let (exp, edu, emp, awards, years, exclusive) = raw;
        let improved = match field {
            0 => ((exp + 1).min(4), edu, emp, awards, years, exclusive),
            1 => (exp, true, emp, awards, years, exclusive),
            2 => (exp, edu, (emp + 1).min(3), awards, years, exclusive),
            3 => (exp, edu, emp, (awards + 1).min(5), years, exclusive),
            4 => (exp, edu, emp, awards, years + 1, exclusive),
            _ => (exp, edu, emp, awards, years, true),
        };

        let before = compute_gage(&build_profile(raw), &settings).gage;
        let after = compute_gage(&build_profile(improved), &settings).gage;
        prop_assert!(after >= before);
    }

    #[test]
    fn override_always_wins(raw in profile_strategy(), pinned in 1..10_000u32) {
        let profile = PerformerProfile {
            admin_gage_override: Some(pinned),
            ..build_profile(raw)
        };
        prop_assert_eq!(compute_gage(&profile, &GageSettings::default()).gage, pinned);
    }

    #[test]
    fn quote_is_ordered_and_non_negative(
        base_min in 0.0..5_000.0f64,
        width in 0.0..5_000.0f64,
        distance_km in 0.0..1_500.0f64,
        agency_fee_percent in 0.0..50.0f64,
        event_type in event_type_strategy(),
        num_guests in 0..2_000u32,
        duration_minutes in 0.0..120.0f64,
        flags in any::<(bool, bool, bool, bool)>(),
        team in 0..6i64,
        local in any::<bool>(),
    ) {
        let (is_weekend, is_indoor, needs_light, needs_sound) = flags;
        let request = QuoteRequest {
            base_min,
            base_max: base_min + width,
            distance_km,
            agency_fee_percent,
            event_type,
            num_guests,
            duration_minutes,
            is_weekend,
            is_indoor,
            needs_light,
            needs_sound,
            team_size: TeamSize::Count(team),
            team_count: None,
            event_address: local.then(|| "Marienplatz 1, München".to_string()),
        };

        let quote = compute_quote(&request, &QuoteSettings::default());
        prop_assert!(quote.min_total >= 0);
        prop_assert!(quote.min_total <= quote.max_total);
    }

    #[test]
    fn quote_is_deterministic(base_min in 0.0..3_000.0f64, tier in 0..5usize) {
        let tiers = [TeamTier::Solo, TeamTier::Duo, TeamTier::Trio, TeamTier::Quartet, TeamTier::Unknown];
        let request = QuoteRequest {
            base_min,
            base_max: base_min * 1.5,
            team_size: TeamSize::Tier(tiers[tier]),
            ..Default::default()
        };
        let settings = QuoteSettings::default();
        prop_assert_eq!(compute_quote(&request, &settings), compute_quote(&request, &settings));
    }
}
