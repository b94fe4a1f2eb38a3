//! Pepe Pricing - gage scoring and booking quotes for the Pepe performer marketplace
//!
//! This library provides the two pricing engines used by the booking platform:
//! a weighted scorer that turns a performer's criteria into a baseline gage,
//! and a quoter that turns a performer's price range plus event details into
//! a client-facing price range. Both are pure functions of their inputs.

pub mod config;
pub mod core;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use crate::config::{GageSettings, QuoteSettings, Settings};
pub use crate::core::{compute_gage, compute_quote, GageEngine, QuoteEngine};
pub use crate::error::PricingError;
pub use crate::models::{
    GageCriteriaRequest, GageResult, PerformerProfile, PriceRange, Quote, QuoteRequest,
    QuoteRequestInput,
};
