//! Configuration management and validation.
//!
//! Provides the tunables of a pipeline run: top-N truncation of the
//! aggregate tables, the cleaning defaults, accepted date layouts and the
//! Parquet export settings.

use crate::constants::{
    DEFAULT_COUNTRY_TOP_N, DEFAULT_DATE_FORMATS, DEFAULT_FILL_VALUE, DEFAULT_GENRE_TOP_N,
    DEFAULT_HISTOGRAM_BINS, DEFAULT_NA_VALUES, DEFAULT_SUMMARY_TOP_N,
};
use crate::error::{CatalogError, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Supported compression algorithms for Parquet export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }

    /// Parse the names accepted on the command line
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            "lz4" => Ok(Self::Lz4),
            "none" | "uncompressed" => Ok(Self::Uncompressed),
            other => Err(CatalogError::configuration(format!(
                "Unknown compression algorithm '{}' (expected snappy, zstd, lz4 or none)",
                other
            ))),
        }
    }
}

/// Settings for a single analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of genres kept in the genre table
    pub genre_top_n: usize,

    /// Number of countries kept in the country table
    pub country_top_n: usize,

    /// Number of genres and countries reported in the summary
    pub summary_top_n: usize,

    /// Literal written into missing Director, Cast and Country cells
    pub fill_value: String,

    /// Cell texts treated as missing on load
    pub na_values: Vec<String>,

    /// chrono layouts tried, in order, when parsing Release_Date
    pub date_formats: Vec<String>,

    /// Bucket count for the movie duration histogram
    pub histogram_bins: usize,

    /// Compression used when exporting the cleaned catalog
    pub compression: CompressionAlgorithm,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            genre_top_n: DEFAULT_GENRE_TOP_N,
            country_top_n: DEFAULT_COUNTRY_TOP_N,
            summary_top_n: DEFAULT_SUMMARY_TOP_N,
            fill_value: DEFAULT_FILL_VALUE.to_string(),
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            compression: CompressionAlgorithm::Snappy,
        }
    }
}

impl AnalysisConfig {
    /// Set the genre and country table size in one go
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.genre_top_n = top_n;
        self.country_top_n = top_n;
        self
    }

    /// Set the genre table size
    pub fn with_genre_top_n(mut self, top_n: usize) -> Self {
        self.genre_top_n = top_n;
        self
    }

    /// Set the country table size
    pub fn with_country_top_n(mut self, top_n: usize) -> Self {
        self.country_top_n = top_n;
        self
    }

    /// Set how many genres and countries the summary reports
    pub fn with_summary_top_n(mut self, top_n: usize) -> Self {
        self.summary_top_n = top_n;
        self
    }

    /// Replace the placeholder for missing people and country cells
    pub fn with_fill_value(mut self, fill_value: impl Into<String>) -> Self {
        self.fill_value = fill_value.into();
        self
    }

    /// Replace the accepted Release_Date layouts
    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }

    /// Set the duration histogram bucket count
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Set the Parquet export compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Whether a raw cell should be read as a missing value
    pub fn is_na(&self, value: &str) -> bool {
        self.na_values.iter().any(|na| na == value)
    }

    /// Reject settings no run can honour
    pub fn validate(&self) -> Result<()> {
        if self.genre_top_n == 0 || self.country_top_n == 0 {
            return Err(CatalogError::configuration(
                "genre_top_n and country_top_n must be greater than zero",
            ));
        }

        if self.summary_top_n == 0 {
            return Err(CatalogError::configuration(
                "summary_top_n must be greater than zero",
            ));
        }

        if self.summary_top_n > self.genre_top_n || self.summary_top_n > self.country_top_n {
            return Err(CatalogError::configuration(format!(
                "summary_top_n ({}) cannot exceed genre_top_n ({}) or country_top_n ({})",
                self.summary_top_n, self.genre_top_n, self.country_top_n
            )));
        }

        if self.histogram_bins == 0 {
            return Err(CatalogError::configuration(
                "histogram_bins must be greater than zero",
            ));
        }

        if self.date_formats.is_empty() {
            return Err(CatalogError::configuration(
                "at least one Release_Date format is required",
            ));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
