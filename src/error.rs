//! Error handling for catalog analysis operations.
//!
//! Covers the three failure kinds a pipeline run can end with (missing input,
//! malformed input, nothing left to analyse) plus wrapped library errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse catalog file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Empty dataset: {reason}")]
    EmptyDataset { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CatalogError {
    /// Create a parse error for the given source
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty dataset error
    pub fn empty_dataset(reason: impl Into<String>) -> Self {
        Self::EmptyDataset {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
