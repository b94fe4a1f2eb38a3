use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::PricingError;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub gage: GageSettings,
    #[serde(default)]
    pub quote: QuoteSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Constants of the gage scoring engine.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GageSettings {
    #[serde(default = "default_base_min")]
    pub base_min: u32,
    #[serde(default = "default_base_max")]
    pub base_max: u32,
    #[serde(default = "default_rounding_unit")]
    pub rounding_unit: u32,
    /// Symmetric spread used to derive an advertised price range from a gage.
    #[serde(default = "default_price_spread_pct")]
    pub price_spread_pct: f64,
}

impl Default for GageSettings {
    fn default() -> Self {
        Self {
            base_min: default_base_min(),
            base_max: default_base_max(),
            rounding_unit: default_rounding_unit(),
            price_spread_pct: default_price_spread_pct(),
        }
    }
}

fn default_base_min() -> u32 { 200 }
fn default_base_max() -> u32 { 2500 }
fn default_rounding_unit() -> u32 { 25 }
fn default_price_spread_pct() -> f64 { 0.20 }

/// Constants of the price quote engine.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QuoteSettings {
    /// Share of `base_min` used as the interpolation floor for private parties.
    #[serde(default = "default_private_min_factor")]
    pub private_min_factor: f64,
    #[serde(default = "default_rate_per_km")]
    pub rate_per_km: f64,
    /// Applied when a request does not carry its own agency fee.
    #[serde(default = "default_agency_fee_percent")]
    pub default_agency_fee_percent: f64,
    #[serde(default = "default_tech_fee_per_item")]
    pub tech_fee_per_item: f64,
    #[serde(default = "default_long_distance_km")]
    pub long_distance_km: f64,
    #[serde(default = "default_long_distance_surcharge")]
    pub long_distance_surcharge: f64,
    #[serde(default = "default_mid_distance_km")]
    pub mid_distance_km: f64,
    #[serde(default = "default_mid_distance_surcharge")]
    pub mid_distance_surcharge: f64,
    #[serde(default = "default_local_market_discount")]
    pub local_market_discount: f64,
    /// Lowercase city tokens that count as the home market.
    #[serde(default = "default_local_cities")]
    pub local_cities: Vec<String>,
    #[serde(default = "default_display_spread_pct")]
    pub display_spread_pct: f64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            private_min_factor: default_private_min_factor(),
            rate_per_km: default_rate_per_km(),
            default_agency_fee_percent: default_agency_fee_percent(),
            tech_fee_per_item: default_tech_fee_per_item(),
            long_distance_km: default_long_distance_km(),
            long_distance_surcharge: default_long_distance_surcharge(),
            mid_distance_km: default_mid_distance_km(),
            mid_distance_surcharge: default_mid_distance_surcharge(),
            local_market_discount: default_local_market_discount(),
            local_cities: default_local_cities(),
            display_spread_pct: default_display_spread_pct(),
        }
    }
}

fn default_private_min_factor() -> f64 { 0.6 }
fn default_rate_per_km() -> f64 { 0.5 }
fn default_agency_fee_percent() -> f64 { 20.0 }
fn default_tech_fee_per_item() -> f64 { 450.0 }
fn default_long_distance_km() -> f64 { 600.0 }
fn default_long_distance_surcharge() -> f64 { 300.0 }
fn default_mid_distance_km() -> f64 { 300.0 }
fn default_mid_distance_surcharge() -> f64 { 200.0 }
fn default_local_market_discount() -> f64 { 100.0 }
fn default_display_spread_pct() -> f64 { 0.20 }

fn default_local_cities() -> Vec<String> {
    vec![
        "münchen".to_string(),
        "muenchen".to_string(),
        "munich".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with PEPE_)
    ///    e.g., PEPE_QUOTE__RATE_PER_KM -> quote.rate_per_km
    /// 4. Legacy flat variables (PRIVATE_MIN_FACTOR, RATE_PER_KM, AGENCY_FEE_PERCENT)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(pepe_environment())
            .build()?;

        let settings = apply_legacy_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(pepe_environment())
            .build()?;

        let settings = apply_legacy_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Check that the constants describe a coherent pricing model.
    ///
    /// Every problem is reported, not just the first.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        let gage = &self.gage;
        if gage.rounding_unit == 0 {
            errors.push("gage.rounding_unit: must be positive".to_string());
        }
        if gage.base_min > gage.base_max {
            errors.push(format!(
                "gage.base_min: {} must not exceed gage.base_max {}",
                gage.base_min, gage.base_max
            ));
        }
        if !(0.0..1.0).contains(&gage.price_spread_pct) {
            errors.push("gage.price_spread_pct: must be within [0, 1)".to_string());
        }

        let quote = &self.quote;
        let non_negative = [
            ("quote.private_min_factor", quote.private_min_factor),
            ("quote.rate_per_km", quote.rate_per_km),
            ("quote.default_agency_fee_percent", quote.default_agency_fee_percent),
            ("quote.tech_fee_per_item", quote.tech_fee_per_item),
            ("quote.long_distance_km", quote.long_distance_km),
            ("quote.long_distance_surcharge", quote.long_distance_surcharge),
            ("quote.mid_distance_km", quote.mid_distance_km),
            ("quote.mid_distance_surcharge", quote.mid_distance_surcharge),
            ("quote.local_market_discount", quote.local_market_discount),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                errors.push(format!("{}: must be non-negative", name));
            }
        }
        if quote.mid_distance_km > quote.long_distance_km {
            errors.push("quote.mid_distance_km: must not exceed quote.long_distance_km".to_string());
        }
        if !(0.0..1.0).contains(&quote.display_spread_pct) {
            errors.push("quote.display_spread_pct: must be within [0, 1)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::Config(errors.join("; ")))
        }
    }
}

fn pepe_environment() -> Environment {
    Environment::with_prefix("PEPE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("quote.local_cities")
}

/// Honour the flat variables the booking backend has always read.
fn apply_legacy_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let legacy = [
        ("PRIVATE_MIN_FACTOR", "quote.private_min_factor"),
        ("RATE_PER_KM", "quote.rate_per_km"),
        ("AGENCY_FEE_PERCENT", "quote.default_agency_fee_percent"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in legacy {
        // Unparseable values fall back to whatever the lower layers set.
        if let Some(value) = env::var(var).ok().and_then(|v| v.trim().parse::<f64>().ok()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_gage_settings() {
        let gage = GageSettings::default();
        assert_eq!(gage.base_min, 200);
        assert_eq!(gage.base_max, 2500);
        assert_eq!(gage.rounding_unit, 25);
        assert_eq!(gage.price_spread_pct, 0.20);
    }

    #[test]
    fn test_default_quote_settings() {
        let quote = QuoteSettings::default();
        assert_eq!(quote.private_min_factor, 0.6);
        assert_eq!(quote.rate_per_km, 0.5);
        assert_eq!(quote.tech_fee_per_item, 450.0);
        assert_eq!(quote.local_cities, vec!["münchen", "muenchen", "munich"]);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut settings = Settings::default();
        settings.gage.rounding_unit = 0;
        settings.gage.base_min = 3000;
        settings.quote.rate_per_km = -1.0;

        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("gage.rounding_unit"));
        assert!(err.contains("gage.base_min"));
        assert!(err.contains("quote.rate_per_km"));
    }

    #[test]
    fn test_validate_rejects_nan_rate() {
        let mut settings = Settings::default();
        settings.quote.rate_per_km = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[gage]\nbase_max = 3000\n\n[quote]\nlocal_cities = [\"berlin\"]\n"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.gage.base_max, 3000);
        assert_eq!(settings.gage.base_min, 200);
        assert_eq!(settings.quote.local_cities, vec!["berlin"]);
        assert_eq!(settings.quote.private_min_factor, 0.6);
    }
}
