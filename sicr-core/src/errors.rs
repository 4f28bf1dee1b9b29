//! errors.rs - Custom error types for the sicr-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use sicr_metrics::EvalError;
use thiserror::Error;

/// All error types surfaced by `sicr-core`.
///
/// Degenerate confusion matrices, empty grids and empty datasets are not
/// errors and never appear here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SicrError {
    /// Labels, predictions or dataset records violate the input contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The ratio rule met a non-positive origination measure.
    #[error("Ratio rule is undefined for account '{account_id}': origination measure must be strictly positive")]
    DivisionByZero { account_id: String },

    #[error("Invalid sweep configuration: {0}")]
    Config(String),

    #[error("Failed to serialize or parse data: {0}")]
    Serialization(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    /// File and parse failures, carrying their context chain.
    #[error("{0:#}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

impl From<EvalError> for SicrError {
    fn from(err: EvalError) -> Self {
        SicrError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for SicrError {
    fn from(err: serde_json::Error) -> Self {
        SicrError::Serialization(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type SicrResult<T> = Result<T, SicrError>;
