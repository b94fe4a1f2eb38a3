// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AwardsLevel, ComponentScore, EmploymentType, EventType, GageComponent, GageResult,
    PerformerProfile, PriceRange, Quote, QuoteBreakdown, QuoteRequest, StageExperience, TeamSize,
    TeamTier,
};
pub use requests::{GageCriteriaRequest, QuoteRequestInput, RecalculationRecord, TeamSizeInput};
pub use responses::{
    ErrorResponse, GageResponse, QuoteResponse, RecalculationEntry, RecalculationResponse,
};
