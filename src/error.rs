use thiserror::Error;

/// Errors surfaced at the boundary of the pricing engines.
///
/// The engines themselves are total; these only come from loading settings
/// and from turning raw input into engine value objects.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for PricingError {
    fn from(err: config::ConfigError) -> Self {
        PricingError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

impl From<validator::ValidationErrors> for PricingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let detail = match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    };
                    // Struct-level checks are filed under "__all__"
                    if field == "__all__" {
                        detail
                    } else {
                        format!("{}: {}", field, detail)
                    }
                })
            })
            .collect();
        messages.sort();
        PricingError::InvalidInput(messages.join("; "))
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
