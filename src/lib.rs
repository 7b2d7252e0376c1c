//! Catalog Insights Library
//!
//! Cleans a media catalog CSV export (movies and TV shows) and computes the
//! descriptive aggregates behind a content-mix analysis.
//!
//! This library provides tools for:
//! - Loading catalog CSV files, skipping malformed rows with a report
//! - Removing duplicate rows and filling missing values with sensible defaults
//! - Parsing release dates and deriving release years
//! - Counting titles per category, country, genre and year
//! - Extracting movie runtimes from their formatted duration text
//! - Assembling a structured summary and exporting the cleaned table to Parquet
//!
//! ```no_run
//! use catalog_insights::{AnalysisConfig, CatalogPipeline};
//!
//! # fn main() -> catalog_insights::Result<()> {
//! let output = CatalogPipeline::new("netflix_titles.csv")?
//!     .with_config(AnalysisConfig::default())
//!     .run()?;
//!
//! println!("{} titles", output.summary.total_records);
//! for genre in output.summary.top_genres.iter() {
//!     println!("{}: {}", genre.key, genre.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod durations;
pub mod error;
pub mod frame;
pub mod frequency;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod summary;

// Re-export commonly used types
pub use aggregator::{Aggregates, Aggregator, YearCategoryMatrix};
pub use cleaner::{CleaningReport, clean};
pub use config::{AnalysisConfig, CompressionAlgorithm};
pub use durations::{DurationExtraction, extract_movie_durations};
pub use error::{CatalogError, Result};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use loader::{LoadReport, load_catalog};
pub use models::{Catalog, CatalogRecord, Category};
pub use pipeline::{CatalogPipeline, PipelineOutput};
pub use summary::{Summary, build_summary};
