use serde::{de, Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::config::QuoteSettings;
use crate::error::PricingError;
use crate::models::domain::{
    AwardsLevel, EmploymentType, EventType, PerformerProfile, QuoteRequest, StageExperience,
    TeamSize, TeamTier,
};

/// Numbers arrive from forms as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn coerce_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawNumber::Number(n)) => n,
        Some(RawNumber::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", text)))?
        }
    };

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(de::Error::custom("expected a finite number"))
    }
}

fn coerce_required_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    coerce_number(deserializer)?.ok_or_else(|| de::Error::custom("a number is required"))
}

/// Request to score a performer's gage criteria
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GageCriteriaRequest {
    #[serde(default, alias = "stage_experience", rename = "stageExperience")]
    pub stage_experience: Option<StageExperience>,
    #[serde(default, alias = "circus_education", rename = "circusEducation")]
    pub circus_education: Option<bool>,
    #[serde(default, alias = "employment_type", rename = "employmentType")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, alias = "awards_level", rename = "awardsLevel")]
    pub awards_level: Option<AwardsLevel>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(default, deserialize_with = "coerce_number", alias = "pepe_years", rename = "pepeYears")]
    pub pepe_years: Option<f64>,
    #[serde(default, alias = "pepe_exclusivity", rename = "pepeExclusivity")]
    pub pepe_exclusivity: Option<bool>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(
        default,
        deserialize_with = "coerce_number",
        alias = "admin_gage_override",
        rename = "adminGageOverride"
    )]
    pub admin_gage_override: Option<f64>,
}

impl GageCriteriaRequest {
    pub fn from_json(raw: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate and convert into the engine's profile.
    ///
    /// Missing criteria become their unknown/zero values; a zero override
    /// counts as no override.
    pub fn into_profile(self) -> Result<PerformerProfile, PricingError> {
        self.validate()?;

        Ok(PerformerProfile {
            stage_experience: self.stage_experience.unwrap_or_default(),
            circus_education: self.circus_education.unwrap_or(false),
            employment_type: self.employment_type.unwrap_or_default(),
            awards_level: self.awards_level.unwrap_or_default(),
            pepe_years: self.pepe_years.map(|y| y as u32).unwrap_or(0),
            pepe_exclusivity: self.pepe_exclusivity.unwrap_or(false),
            admin_gage_override: self
                .admin_gage_override
                .map(|g| g as u32)
                .filter(|g| *g > 0),
        })
    }
}

/// Team size as it arrives from the booking wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamSizeInput {
    Count(f64),
    Name(String),
}

impl From<TeamSizeInput> for TeamSize {
    fn from(input: TeamSizeInput) -> Self {
        match input {
            TeamSizeInput::Count(n) => TeamSize::Count(n as i64),
            TeamSizeInput::Name(name) => TeamSize::Tier(TeamTier::from(name.as_str())),
        }
    }
}

/// Request for a price quote on a booking
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_base_range"))]
pub struct QuoteRequestInput {
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(deserialize_with = "coerce_required_number", alias = "base_min", rename = "baseMin")]
    pub base_min: f64,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(deserialize_with = "coerce_required_number", alias = "base_max", rename = "baseMax")]
    pub base_max: f64,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(default, deserialize_with = "coerce_number", alias = "distance_km", rename = "distanceKm")]
    pub distance_km: Option<f64>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(
        default,
        deserialize_with = "coerce_number",
        alias = "agency_fee_percent",
        rename = "agencyFeePercent"
    )]
    pub agency_fee_percent: Option<f64>,
    #[serde(default, alias = "event_type", rename = "eventType")]
    pub event_type: Option<EventType>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(default, deserialize_with = "coerce_number", alias = "num_guests", rename = "numGuests")]
    pub num_guests: Option<f64>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(
        default,
        deserialize_with = "coerce_number",
        alias = "duration",
        alias = "duration_minutes",
        rename = "durationMinutes"
    )]
    pub duration_minutes: Option<f64>,
    #[serde(default, alias = "is_weekend", rename = "isWeekend")]
    pub is_weekend: Option<bool>,
    #[serde(default, alias = "is_indoor", rename = "isIndoor")]
    pub is_indoor: Option<bool>,
    #[serde(default, alias = "needs_light", rename = "needsLight")]
    pub needs_light: Option<bool>,
    #[serde(default, alias = "needs_sound", rename = "needsSound")]
    pub needs_sound: Option<bool>,
    #[serde(default, alias = "team_size", rename = "teamSize")]
    pub team_size: Option<TeamSizeInput>,
    #[serde(default, deserialize_with = "coerce_number", alias = "team_count", rename = "teamCount")]
    pub team_count: Option<f64>,
    #[serde(default, alias = "event_address", rename = "eventAddress")]
    pub event_address: Option<String>,
}

fn validate_base_range(input: &QuoteRequestInput) -> Result<(), ValidationError> {
    if input.base_min > input.base_max {
        let mut err = ValidationError::new("base_range");
        err.message = Some(Cow::from("baseMin must not exceed baseMax"));
        return Err(err);
    }
    Ok(())
}

impl QuoteRequestInput {
    pub fn from_json(raw: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate and convert into the engine's request, filling gaps from settings.
    pub fn into_request(self, settings: &QuoteSettings) -> Result<QuoteRequest, PricingError> {
        self.validate()?;

        Ok(QuoteRequest {
            base_min: self.base_min,
            base_max: self.base_max,
            distance_km: self.distance_km.unwrap_or(0.0),
            agency_fee_percent: self
                .agency_fee_percent
                .unwrap_or(settings.default_agency_fee_percent),
            event_type: self.event_type.unwrap_or_default(),
            num_guests: self.num_guests.map(|g| g as u32).unwrap_or(0),
            duration_minutes: self.duration_minutes.unwrap_or(0.0),
            is_weekend: self.is_weekend.unwrap_or(false),
            is_indoor: self.is_indoor.unwrap_or(true),
            needs_light: self.needs_light.unwrap_or(false),
            needs_sound: self.needs_sound.unwrap_or(false),
            team_size: self.team_size.map(TeamSize::from).unwrap_or_default(),
            team_count: self.team_count.map(|c| c as i64),
            event_address: self.event_address.filter(|a| !a.trim().is_empty()),
        })
    }
}

/// One stored performer to re-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationRecord {
    pub id: String,
    #[serde(default, alias = "stored_gage", rename = "storedGage")]
    pub stored_gage: Option<u32>,
    #[serde(default)]
    pub criteria: GageCriteriaRequest,
}
