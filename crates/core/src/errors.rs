//! Core error types for skinprice.

use std::num::ParseIntError;

use thiserror::Error;

pub use skinprice_market_data::errors::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the price service.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    MarketData(#[from] MarketDataError),
}

/// Validation errors for user input and query parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseIntError),
}

/// Startup configuration errors.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown price provider '{0}'")]
    UnknownProvider(String),

    #[error("Provider '{provider}' requires {variable} to be set")]
    MissingCredential {
        provider: String,
        variable: &'static str,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("No price providers selected")]
    NoProviders,
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Validation(ValidationError::NumberParse(err))
    }
}
