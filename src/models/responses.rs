use serde::{Deserialize, Serialize};
use crate::models::domain::{ComponentScore, PriceRange, QuoteBreakdown};

/// Response for a gage calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GageResponse {
    pub gage: u32,
    pub overridden: bool,
    #[serde(rename = "baseRange")]
    pub base_range: String,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    #[serde(rename = "totalScore")]
    pub total_score: Option<f64>,
    pub components: Vec<ComponentScore>,
}

/// Response for a price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "minTotal")]
    pub min_total: i64,
    #[serde(rename = "maxTotal")]
    pub max_total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<QuoteBreakdown>,
}

/// Per-record outcome of a recalculation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationEntry {
    pub id: String,
    #[serde(rename = "oldGage")]
    pub old_gage: Option<u32>,
    #[serde(rename = "newGage")]
    pub new_gage: u32,
    pub updated: bool,
    #[serde(rename = "priceRange")]
    pub price_range: Option<PriceRange>,
}

/// Response for a recalculation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationResponse {
    pub total: usize,
    pub updated: usize,
    pub results: Vec<RecalculationEntry>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
