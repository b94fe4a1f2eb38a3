use clap::{Parser, Subcommand};
use pepe_pricing::core::{compute_quote_breakdown, derive_price_range, recalculate_all};
use pepe_pricing::models::{
    ErrorResponse, GageCriteriaRequest, GageResponse, QuoteRequestInput, QuoteResponse,
    RecalculationEntry, RecalculationRecord, RecalculationResponse,
};
use pepe_pricing::{GageEngine, PricingError, Settings};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_IO: u8 = 3;
const EXIT_CONFIG: u8 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a performer's gage from their criteria (JSON object)
    Gage {
        /// Input file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Quote a booking request (JSON object)
    Quote {
        /// Input file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Include every intermediate value in the output
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Re-score stored performers (JSON array of {id, storedGage, criteria})
    Recalculate {
        /// Input file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "pepe-pricing")]
#[command(about = "Gage scoring and booking price quotes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a settings file (defaults to config/default + config/local)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_logging(&settings, cli.verbose);
    info!("Configuration loaded successfully");

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let (code, kind) = match &e {
                PricingError::InvalidInput(_) => (EXIT_INVALID_INPUT, "invalid_input"),
                PricingError::Io(_) => (EXIT_IO, "io"),
                PricingError::Config(_) => (EXIT_CONFIG, "config"),
            };
            let response = ErrorResponse {
                error: kind.to_string(),
                message: e.to_string(),
            };
            if let Err(e) = print_json(&response) {
                eprintln!("Failed to write error response: {}", e);
            }
            ExitCode::from(code)
        }
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, PricingError> {
    let settings = match path {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    settings.validate()?;
    Ok(settings)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(settings: &Settings, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn run(command: Commands, settings: &Settings) -> Result<(), PricingError> {
    match command {
        Commands::Gage { input } => {
            let raw = read_input(input.as_ref())?;
            let profile = GageCriteriaRequest::from_json(&raw)?.into_profile()?;

            let engine = GageEngine::new(settings.gage.clone());
            let result = engine.compute(&profile);
            info!(gage = result.gage, overridden = result.overridden, "Gage calculated");

            print_json(&GageResponse {
                gage: result.gage,
                overridden: result.overridden,
                base_range: engine.base_range_label(),
                price_range: derive_price_range(result.gage, settings.gage.price_spread_pct),
                total_score: result.total_score,
                components: result.breakdown,
            })
        }
        Commands::Quote { input, breakdown } => {
            let raw = read_input(input.as_ref())?;
            let request = QuoteRequestInput::from_json(&raw)?.into_request(&settings.quote)?;

            let result = compute_quote_breakdown(&request, &settings.quote);
            info!(
                min_total = result.quote.min_total,
                max_total = result.quote.max_total,
                "Quote calculated"
            );

            print_json(&QuoteResponse {
                min_total: result.quote.min_total,
                max_total: result.quote.max_total,
                breakdown: breakdown.then_some(result),
            })
        }
        Commands::Recalculate { input } => {
            let raw = read_input(input.as_ref())?;
            let records: Vec<RecalculationRecord> = serde_json::from_str(&raw)?;

            let mut profiles = Vec::with_capacity(records.len());
            for record in records {
                let profile = record.criteria.into_profile().map_err(|e| {
                    PricingError::InvalidInput(format!("record {}: {}", record.id, e))
                })?;
                profiles.push((record.id, record.stored_gage, profile));
            }

            let summary = recalculate_all(profiles, &settings.gage);

            print_json(&RecalculationResponse {
                total: summary.total,
                updated: summary.updated,
                results: summary
                    .results
                    .into_iter()
                    .map(|(id, r)| RecalculationEntry {
                        id,
                        old_gage: r.old_gage,
                        new_gage: r.new_gage,
                        updated: r.updated,
                        price_range: r.price_range,
                    })
                    .collect(),
            })
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String, PricingError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PricingError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
