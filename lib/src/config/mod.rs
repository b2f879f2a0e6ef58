//! Configuration module for travel planning settings.
//!
//! Settings can be built in code with the `with_*` builders or loaded from
//! JSON; any field missing from the JSON keeps its default.

mod travel_config;

pub use travel_config::{FillRule, TravelConfig, MAX_SUPPORTED_PERTURBATION_DEPTH};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
