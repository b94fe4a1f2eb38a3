use serde::{Deserialize, Serialize};
use std::fmt;

/// Years on stage, bucketed the way performers self-report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StageExperience {
    #[default]
    Unknown,
    UpToTwo,
    ThreeToFive,
    SixToTen,
    MoreThanTen,
}

impl StageExperience {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageExperience::UpToTwo => "0-2",
            StageExperience::ThreeToFive => "3-5",
            StageExperience::SixToTen => "6-10",
            StageExperience::MoreThanTen => "10+",
            StageExperience::Unknown => "unknown",
        }
    }
}

impl From<&str> for StageExperience {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "0-2" => StageExperience::UpToTwo,
            "3-5" => StageExperience::ThreeToFive,
            "6-10" => StageExperience::SixToTen,
            "10+" => StageExperience::MoreThanTen,
            _ => StageExperience::Unknown,
        }
    }
}

/// How a performer earns their living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentType {
    #[default]
    Unknown,
    Hobby,
    PartTime,
    FullTime,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "fulltime",
            EmploymentType::PartTime => "parttime",
            EmploymentType::Hobby => "hobby",
            EmploymentType::Unknown => "unknown",
        }
    }
}

impl From<&str> for EmploymentType {
    fn from(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "fulltime" | "vollzeit" => EmploymentType::FullTime,
            "parttime" | "teilzeit" => EmploymentType::PartTime,
            "hobby" => EmploymentType::Hobby,
            _ => EmploymentType::Unknown,
        }
    }
}

/// Highest level at which a performer has won an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AwardsLevel {
    #[default]
    Unknown,
    None,
    Local,
    Regional,
    National,
    International,
}

impl AwardsLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AwardsLevel::International => "international",
            AwardsLevel::National => "national",
            AwardsLevel::Regional => "regional",
            AwardsLevel::Local => "local",
            AwardsLevel::None => "none",
            AwardsLevel::Unknown => "unknown",
        }
    }
}

impl From<&str> for AwardsLevel {
    fn from(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "international" => AwardsLevel::International,
            "national" => AwardsLevel::National,
            "regional" => AwardsLevel::Regional,
            "local" | "lokal" => AwardsLevel::Local,
            "none" | "keine" => AwardsLevel::None,
            _ => AwardsLevel::Unknown,
        }
    }
}

/// Kind of event a booking request is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    #[default]
    PrivateParty,
    CorporateEvent,
    TeamEvent,
    StreetShow,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::PrivateParty => "PrivateParty",
            EventType::CorporateEvent => "CorporateEvent",
            EventType::TeamEvent => "TeamEvent",
            EventType::StreetShow => "StreetShow",
            EventType::Other(name) => name,
        }
    }
}

impl From<&str> for EventType {
    fn from(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "privateparty" | "privatefeier" => EventType::PrivateParty,
            "corporateevent" | "firmenfeier" => EventType::CorporateEvent,
            "teamevent" => EventType::TeamEvent,
            "streetshow" => EventType::StreetShow,
            _ => EventType::Other(raw.trim().to_string()),
        }
    }
}

/// Named ensemble sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamTier {
    #[default]
    Solo,
    Duo,
    Trio,
    Quartet,
    Unknown,
}

impl TeamTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamTier::Solo => "solo",
            TeamTier::Duo => "duo",
            TeamTier::Trio => "trio",
            TeamTier::Quartet => "quartet",
            TeamTier::Unknown => "unknown",
        }
    }
}

impl From<&str> for TeamTier {
    fn from(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "solo" | "1" => TeamTier::Solo,
            "duo" | "2" => TeamTier::Duo,
            "trio" | "3" => TeamTier::Trio,
            "quartet" | "4" => TeamTier::Quartet,
            _ => TeamTier::Unknown,
        }
    }
}

/// Team size as supplied by the booking form: a head count or a tier name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamSize {
    Count(i64),
    Tier(TeamTier),
}

impl Default for TeamSize {
    fn default() -> Self {
        TeamSize::Tier(TeamTier::Solo)
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                <$ty>::from(raw.as_str())
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

string_conversions!(StageExperience, EmploymentType, AwardsLevel, EventType, TeamTier);

/// Lowercase and strip separators so "Private Feier", "private_party" and
/// "PrivateParty" all compare equal.
fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Qualitative criteria a performer is scored on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformerProfile {
    #[serde(rename = "stageExperience")]
    pub stage_experience: StageExperience,
    #[serde(rename = "circusEducation")]
    pub circus_education: bool,
    #[serde(rename = "employmentType")]
    pub employment_type: EmploymentType,
    #[serde(rename = "awardsLevel")]
    pub awards_level: AwardsLevel,
    #[serde(rename = "pepeYears")]
    pub pepe_years: u32,
    #[serde(rename = "pepeExclusivity")]
    pub pepe_exclusivity: bool,
    #[serde(rename = "adminGageOverride")]
    pub admin_gage_override: Option<u32>,
}

impl PerformerProfile {
    /// The override, if one is set. Zero counts as unset.
    pub fn active_override(&self) -> Option<u32> {
        self.admin_gage_override.filter(|gage| *gage > 0)
    }
}

/// Names of the five gage components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GageComponent {
    StageExperience,
    CircusEducation,
    EmploymentType,
    AwardsLevel,
    PepeCommitment,
}

impl GageComponent {
    pub const ALL: [GageComponent; 5] = [
        GageComponent::StageExperience,
        GageComponent::CircusEducation,
        GageComponent::EmploymentType,
        GageComponent::AwardsLevel,
        GageComponent::PepeCommitment,
    ];
}

/// One line of a gage breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub component: GageComponent,
    /// Human readable input value, e.g. "10+" or "2 years, exclusive: yes"
    pub value: String,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Result of scoring a performer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GageResult {
    pub gage: u32,
    pub overridden: bool,
    /// Weighted sum of the component scores, `None` when overridden.
    #[serde(rename = "totalScore")]
    pub total_score: Option<f64>,
    /// Empty when overridden.
    pub breakdown: Vec<ComponentScore>,
}

impl GageResult {
    pub fn component(&self, component: GageComponent) -> Option<&ComponentScore> {
        self.breakdown.iter().find(|c| c.component == component)
    }
}

/// A performer's advertised compensation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

/// Event parameters of a booking request, already coerced to numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub base_min: f64,
    pub base_max: f64,
    pub distance_km: f64,
    pub agency_fee_percent: f64,
    pub event_type: EventType,
    pub num_guests: u32,
    pub duration_minutes: f64,
    pub is_weekend: bool,
    pub is_indoor: bool,
    pub needs_light: bool,
    pub needs_sound: bool,
    pub team_size: TeamSize,
    /// Explicit head count, takes precedence over `team_size`.
    pub team_count: Option<i64>,
    pub event_address: Option<String>,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            base_min: 0.0,
            base_max: 0.0,
            distance_km: 0.0,
            agency_fee_percent: 0.0,
            event_type: EventType::default(),
            num_guests: 0,
            duration_minutes: 0.0,
            is_weekend: false,
            is_indoor: true,
            needs_light: false,
            needs_sound: false,
            team_size: TeamSize::default(),
            team_count: None,
            event_address: None,
        }
    }
}

/// Client-facing quoted price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "minTotal")]
    pub min_total: i64,
    #[serde(rename = "maxTotal")]
    pub max_total: i64,
}

/// Every intermediate value of a quote, for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub min_floor: f64,
    pub performers: u32,
    pub event_type_score: f64,
    pub guests_score: f64,
    pub duration_score: f64,
    pub outdoor_score: f64,
    pub weekend_score: f64,
    pub composite_score: f64,
    pub base_price: f64,
    pub fee_adjusted: f64,
    pub tech_fee: f64,
    pub distance_surcharge: f64,
    pub local_adjustment: f64,
    pub travel_fee: f64,
    pub total: f64,
    pub quote: Quote,
}
