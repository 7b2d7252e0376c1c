//! End-to-end analysis pipeline.
//!
//! Runs the stages in order: load, clean, then aggregates and duration
//! extraction, then the summary. A loader or cleaner failure aborts the run
//! before any later stage executes, so a run yields either a full
//! [`PipelineOutput`] or a single error.

#[cfg(test)]
pub mod tests;

use crate::aggregator::{Aggregates, Aggregator};
use crate::cleaner::{CleaningReport, clean};
use crate::config::AnalysisConfig;
use crate::durations::{DurationExtraction, extract_movie_durations};
use crate::error::{CatalogError, Result};
use crate::loader::{LoadReport, load_catalog};
use crate::models::Catalog;
use crate::summary::{Summary, build_summary};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub summary: Summary,
    pub aggregates: Aggregates,
    pub durations: DurationExtraction,
    pub load_report: LoadReport,
    pub cleaning_report: CleaningReport,
    /// The cleaned table, for export
    pub catalog: Catalog,
    pub processing_time_ms: u128,
}

/// Pipeline over one catalog file
#[derive(Debug, Clone)]
pub struct CatalogPipeline {
    input_path: PathBuf,
    config: AnalysisConfig,
}

impl CatalogPipeline {
    /// Create a pipeline for `input_path`, which must exist
    pub fn new(input_path: impl Into<PathBuf>) -> Result<Self> {
        let input_path = input_path.into();

        if !input_path.exists() {
            return Err(CatalogError::FileNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            config: AnalysisConfig::default(),
        })
    }

    /// Configure the pipeline
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load the input file and run every stage
    pub fn run(&self) -> Result<PipelineOutput> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Analysing catalog {}", self.input_path.display());
        let (catalog, load_report) = load_catalog(&self.input_path, &self.config)?;

        let mut output = run_stages(&catalog, load_report, &self.config)?;
        output.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Analysis complete in {}ms: {} records summarised",
            output.processing_time_ms, output.summary.total_records
        );
        Ok(output)
    }
}

/// Run every stage after loading on an already loaded catalog
pub fn analyze(
    catalog: &Catalog,
    load_report: LoadReport,
    config: &AnalysisConfig,
) -> Result<PipelineOutput> {
    config.validate()?;
    run_stages(catalog, load_report, config)
}

/// Clean, aggregate and summarise with a validated configuration
fn run_stages(
    catalog: &Catalog,
    load_report: LoadReport,
    config: &AnalysisConfig,
) -> Result<PipelineOutput> {
    let start_time = Instant::now();
    let (cleaned, cleaning_report) = clean(catalog, config)?;

    let aggregates = Aggregator::new(&cleaned).aggregate(config);
    let durations = extract_movie_durations(&cleaned.records);
    debug!(
        "{} movie durations extracted, {} rejected",
        durations.minutes.len(),
        durations.rejected
    );

    let summary = build_summary(&cleaned, &aggregates, &durations, config);

    Ok(PipelineOutput {
        summary,
        aggregates,
        durations,
        load_report,
        cleaning_report,
        catalog: cleaned,
        processing_time_ms: start_time.elapsed().as_millis(),
    })
}
