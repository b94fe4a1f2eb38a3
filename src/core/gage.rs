use tracing::{debug, trace};

use crate::config::GageSettings;
use crate::core::spread::derive_price_range;
use crate::models::{
    AwardsLevel, ComponentScore, EmploymentType, GageComponent, GageResult, PerformerProfile,
    PriceRange, StageExperience,
};

/// Relative importance of each gage component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GageWeights {
    pub stage_experience: f64,
    pub circus_education: f64,
    pub employment_type: f64,
    pub awards_level: f64,
    pub pepe_commitment: f64,
}

/// The weights always sum to 1.0.
pub const GAGE_WEIGHTS: GageWeights = GageWeights {
    stage_experience: 0.40,
    circus_education: 0.25,
    employment_type: 0.20,
    awards_level: 0.10,
    pepe_commitment: 0.05,
};

impl GageWeights {
    pub fn weight(&self, component: GageComponent) -> f64 {
        match component {
            GageComponent::StageExperience => self.stage_experience,
            GageComponent::CircusEducation => self.circus_education,
            GageComponent::EmploymentType => self.employment_type,
            GageComponent::AwardsLevel => self.awards_level,
            GageComponent::PepeCommitment => self.pepe_commitment,
        }
    }

    pub fn total(&self) -> f64 {
        GageComponent::ALL.iter().map(|c| self.weight(*c)).sum()
    }
}

const NOT_SPECIFIED: &str = "not specified";

/// Score a performer's gage (0-2500 by default) from their criteria
///
/// Scoring formula:
/// score = (
///     experience_score * 0.40 +    # Years on stage
///     education_score * 0.25 +     # Circus school graduate
///     employment_score * 0.20 +    # Full-time professional or hobbyist
///     awards_score * 0.10 +        # Highest award level
///     commitment_score * 0.05      # Tenure and exclusivity with Pepe
/// )
/// gage = round_to(base_min + (base_max - base_min) * score, rounding_unit)
///
/// An admin override short-circuits scoring entirely.
pub fn compute_gage(profile: &PerformerProfile, settings: &GageSettings) -> GageResult {
    if let Some(gage) = profile.active_override() {
        debug!(gage, "Admin gage override set, skipping scoring");
        return GageResult {
            gage,
            overridden: true,
            total_score: None,
            breakdown: Vec::new(),
        };
    }

    let breakdown = score_components(profile);
    let total_score: f64 = breakdown.iter().map(|c| c.contribution).sum();
    let gage = interpolate_gage(total_score, settings);

    debug!(total_score, gage, "Computed gage");

    GageResult {
        gage,
        overridden: false,
        total_score: Some(total_score),
        breakdown,
    }
}

/// Scorer holding its constants, for callers that score many performers.
#[derive(Debug, Clone, Default)]
pub struct GageEngine {
    settings: GageSettings,
}

impl GageEngine {
    pub fn new(settings: GageSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GageSettings {
        &self.settings
    }

    pub fn compute(&self, profile: &PerformerProfile) -> GageResult {
        compute_gage(profile, &self.settings)
    }

    /// The price range a performer advertises: the gage (or override) ± spread.
    pub fn advertised_range(&self, profile: &PerformerProfile) -> PriceRange {
        let gage = self.compute(profile).gage;
        derive_price_range(gage, self.settings.price_spread_pct)
    }

    /// Label for the configured range, e.g. "200€ - 2500€"
    pub fn base_range_label(&self) -> String {
        format!("{}€ - {}€", self.settings.base_min, self.settings.base_max)
    }
}

fn score_components(profile: &PerformerProfile) -> Vec<ComponentScore> {
    GageComponent::ALL
        .iter()
        .map(|&component| {
            let (value, score) = match component {
                GageComponent::StageExperience => (
                    label_or_unspecified(
                        profile.stage_experience.as_str(),
                        profile.stage_experience == StageExperience::Unknown,
                    ),
                    experience_score(profile.stage_experience),
                ),
                GageComponent::CircusEducation => (
                    yes_no(profile.circus_education).to_string(),
                    education_score(profile.circus_education),
                ),
                GageComponent::EmploymentType => (
                    label_or_unspecified(
                        profile.employment_type.as_str(),
                        profile.employment_type == EmploymentType::Unknown,
                    ),
                    employment_score(profile.employment_type),
                ),
                GageComponent::AwardsLevel => (
                    label_or_unspecified(
                        profile.awards_level.as_str(),
                        profile.awards_level == AwardsLevel::Unknown,
                    ),
                    awards_score(profile.awards_level),
                ),
                GageComponent::PepeCommitment => (
                    format!(
                        "{} years, exclusive: {}",
                        profile.pepe_years,
                        yes_no(profile.pepe_exclusivity)
                    ),
                    commitment_score(profile.pepe_years, profile.pepe_exclusivity),
                ),
            };

            let weight = GAGE_WEIGHTS.weight(component);
            trace!(?component, score, weight, "Scored gage component");

            ComponentScore {
                component,
                value,
                score,
                weight,
                contribution: score * weight,
            }
        })
        .collect()
}

/// Map a 0-1 score onto the configured range, rounded to the rounding unit.
fn interpolate_gage(total_score: f64, settings: &GageSettings) -> u32 {
    let score = total_score.clamp(0.0, 1.0);
    let span = settings.base_max.saturating_sub(settings.base_min) as f64;
    let raw = settings.base_min as f64 + span * score;
    round_to_unit(raw, settings.rounding_unit)
}

/// Round to the nearest multiple of `unit`, halves away from zero.
pub fn round_to_unit(value: f64, unit: u32) -> u32 {
    if unit == 0 {
        return value.round() as u32;
    }
    let unit = unit as f64;
    ((value / unit).round() * unit) as u32
}

#[inline]
pub fn experience_score(experience: StageExperience) -> f64 {
    match experience {
        StageExperience::MoreThanTen => 1.0,
        StageExperience::SixToTen => 0.7,
        StageExperience::ThreeToFive => 0.4,
        StageExperience::UpToTwo => 0.1,
        StageExperience::Unknown => 0.0,
    }
}

/// Never zero: lacking circus school is a floor, not an absence.
#[inline]
pub fn education_score(circus_education: bool) -> f64 {
    if circus_education {
        1.0
    } else {
        0.1
    }
}

#[inline]
pub fn employment_score(employment: EmploymentType) -> f64 {
    match employment {
        EmploymentType::FullTime => 1.0,
        EmploymentType::PartTime => 0.5,
        EmploymentType::Hobby => 0.2,
        EmploymentType::Unknown => 0.0,
    }
}

#[inline]
pub fn awards_score(awards: AwardsLevel) -> f64 {
    match awards {
        AwardsLevel::International => 1.0,
        AwardsLevel::National => 0.8,
        AwardsLevel::Regional => 0.4,
        AwardsLevel::Local => 0.2,
        AwardsLevel::None => 0.05,
        AwardsLevel::Unknown => 0.0,
    }
}

/// Tenure earns up to 0.6, exclusivity another 0.4.
#[inline]
pub fn commitment_score(pepe_years: u32, exclusive: bool) -> f64 {
    let years = (pepe_years as f64 * 0.15).min(0.6);
    let exclusivity = if exclusive { 0.4 } else { 0.0 };
    (years + exclusivity).min(1.0)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn label_or_unspecified(label: &str, unknown: bool) -> String {
    if unknown {
        NOT_SPECIFIED.to_string()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_performer() -> PerformerProfile {
        PerformerProfile {
            stage_experience: StageExperience::MoreThanTen,
            circus_education: true,
            employment_type: EmploymentType::FullTime,
            awards_level: AwardsLevel::International,
            pepe_years: 5,
            pepe_exclusivity: true,
            admin_gage_override: None,
        }
    }

    fn beginner() -> PerformerProfile {
        PerformerProfile {
            stage_experience: StageExperience::UpToTwo,
            circus_education: false,
            employment_type: EmploymentType::Hobby,
            awards_level: AwardsLevel::None,
            pepe_years: 0,
            pepe_exclusivity: false,
            admin_gage_override: None,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((GAGE_WEIGHTS.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_performer_hits_ceiling() {
        let result = compute_gage(&top_performer(), &GageSettings::default());
        assert_eq!(result.gage, 2500);
        assert!(!result.overridden);
    }

    #[test]
    fn test_beginner_scores_near_floor() {
        // 0.1*0.40 + 0.1*0.25 + 0.2*0.20 + 0.05*0.10 + 0.0*0.05 = 0.11
        let result = compute_gage(&beginner(), &GageSettings::default());
        let total = result.total_score.unwrap();

        assert!((total - 0.11).abs() < 1e-9);
        // 200 + 2300 * 0.11 = 453 -> 450
        assert_eq!(result.gage, 450);
    }

    #[test]
    fn test_override_short_circuits() {
        let profile = PerformerProfile {
            admin_gage_override: Some(1000),
            ..beginner()
        };
        let result = compute_gage(&profile, &GageSettings::default());

        assert_eq!(result.gage, 1000);
        assert!(result.overridden);
        assert!(result.breakdown.is_empty());
        assert_eq!(result.total_score, None);
    }

    #[test]
    fn test_empty_profile_near_floor() {
        // Only the education floor contributes: 0.1 * 0.25 = 0.025
        let result = compute_gage(&PerformerProfile::default(), &GageSettings::default());
        assert_eq!(result.gage, 250);
    }

    #[test]
    fn test_breakdown_contributions() {
        let result = compute_gage(&top_performer(), &GageSettings::default());
        assert_eq!(result.breakdown.len(), 5);

        let experience = result.component(GageComponent::StageExperience).unwrap();
        assert_eq!(experience.value, "10+");
        assert_eq!(experience.weight, 0.40);
        assert_eq!(experience.contribution, 0.40);

        let commitment = result.component(GageComponent::PepeCommitment).unwrap();
        assert_eq!(commitment.value, "5 years, exclusive: yes");
        assert_eq!(commitment.score, 1.0);
    }

    #[test]
    fn test_unknown_values_labelled() {
        let result = compute_gage(&PerformerProfile::default(), &GageSettings::default());
        let awards = result.component(GageComponent::AwardsLevel).unwrap();
        assert_eq!(awards.value, "not specified");
        assert_eq!(awards.score, 0.0);
    }

    #[test]
    fn test_commitment_score_caps() {
        assert_eq!(commitment_score(0, false), 0.0);
        assert!((commitment_score(2, false) - 0.3).abs() < 1e-12);
        assert!((commitment_score(10, false) - 0.6).abs() < 1e-12);
        assert_eq!(commitment_score(10, true), 1.0);
    }

    #[test]
    fn test_round_to_unit() {
        assert_eq!(round_to_unit(401.25, 25), 400);
        assert_eq!(round_to_unit(412.5, 25), 425);
        assert_eq!(round_to_unit(437.4, 25), 425);
        assert_eq!(round_to_unit(12.5, 0), 13);
    }

    #[test]
    fn test_custom_range() {
        let settings = GageSettings {
            base_min: 500,
            base_max: 1500,
            rounding_unit: 50,
            price_spread_pct: 0.2,
        };
        let result = compute_gage(&top_performer(), &settings);
        assert_eq!(result.gage, 1500);
    }

    #[test]
    fn test_engine_advertised_range() {
        let engine = GageEngine::default();
        let range = engine.advertised_range(&top_performer());
        assert_eq!(range, PriceRange { min: 2000, max: 3000 });
        assert_eq!(engine.base_range_label(), "200€ - 2500€");
    }
}
