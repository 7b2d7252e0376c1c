//! Catalog CSV loading.
//!
//! Reads a header row plus data rows into a [`Catalog`]. Rows whose field
//! count disagrees with the header are dropped and recorded in the
//! [`LoadReport`] instead of shifting values into the wrong columns.

use crate::config::AnalysisConfig;
use crate::constants::{FIELD_DELIMITER, REQUIRED_COLUMNS};
use crate::error::{CatalogError, Result};
use crate::models::{Catalog, CatalogRecord, CatalogSchema, ColumnRole};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// A data row the loader refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based line number in the source file
    pub line: u64,
    pub reason: String,
}

/// Missing-value count of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnNullCount {
    pub column: String,
    pub nulls: usize,
}

/// What the loader saw while reading a file
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Data rows encountered, accepted or not
    pub rows_read: usize,

    /// Rows that made it into the catalog
    pub rows_loaded: usize,

    /// Header names in file order
    pub columns: Vec<String>,

    /// Rows dropped for a field count mismatch
    pub rejected_rows: Vec<RejectedRow>,

    /// Missing values per column over the loaded rows
    pub null_counts: Vec<ColumnNullCount>,
}

impl LoadReport {
    /// `(rows, columns)` of the loaded table
    pub fn shape(&self) -> (usize, usize) {
        (self.rows_loaded, self.columns.len())
    }

    pub fn rows_rejected(&self) -> usize {
        self.rejected_rows.len()
    }

    /// Total missing cells across all columns
    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|c| c.nulls).sum()
    }
}

/// Load a catalog CSV file from disk
pub fn load_catalog(path: &Path, config: &AnalysisConfig) -> Result<(Catalog, LoadReport)> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Loading catalog from {}", path.display());
    let file = File::open(path)?;
    load_catalog_from_reader(BufReader::new(file), path, config)
}

/// Load a catalog from any reader; `source` is only used in messages
pub fn load_catalog_from_reader<R: Read>(
    input: R,
    source: &Path,
    config: &AnalysisConfig,
) -> Result<(Catalog, LoadReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(FIELD_DELIMITER)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::parse(source, format!("Failed to read header row: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let schema = build_schema(headers, source)?;
    debug!(
        "Header of {}: {} columns, Listed_in present: {}",
        source.display(),
        schema.width(),
        schema.has_listed_in
    );

    let mut report = LoadReport {
        columns: schema.headers.clone(),
        ..Default::default()
    };
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result.map_err(|e| {
            CatalogError::parse(source, format!("Malformed CSV data: {}", e))
        })?;
        report.rows_read += 1;

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != schema.width() {
            let reason = format!(
                "expected {} fields, found {}",
                schema.width(),
                row.len()
            );
            warn!("Skipping line {} of {}: {}", line, source.display(), reason);
            report.rejected_rows.push(RejectedRow { line, reason });
            continue;
        }

        let mut record = CatalogRecord {
            extra: vec![None; schema.extra_count()],
            ..Default::default()
        };
        for (value, role) in row.iter().zip(schema.roles.iter().copied()) {
            let cell = if config.is_na(value) {
                None
            } else {
                Some(value.to_string())
            };
            record.set_text(role, cell);
        }
        records.push(record);
    }

    report.rows_loaded = records.len();
    report.null_counts = count_nulls(&schema, &records);

    info!(
        "Loaded {} rows x {} columns ({} rejected)",
        report.rows_loaded,
        schema.width(),
        report.rows_rejected()
    );

    Ok((Catalog::new(schema, records), report))
}

/// Validate the header row and derive the column layout
fn build_schema(headers: Vec<String>, source: &Path) -> Result<CatalogSchema> {
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CatalogError::parse(source, "Missing header row"));
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == required))
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::parse(
            source,
            format!("Missing required columns: {}", missing.join(", ")),
        ));
    }

    for (index, name) in headers.iter().enumerate() {
        if ColumnRole::for_header(name).is_some() && headers[..index].contains(name) {
            return Err(CatalogError::parse(
                source,
                format!("Column '{}' appears more than once", name),
            ));
        }
    }

    Ok(CatalogSchema::from_headers(headers))
}

fn count_nulls(schema: &CatalogSchema, records: &[CatalogRecord]) -> Vec<ColumnNullCount> {
    schema
        .columns()
        .map(|(name, role)| ColumnNullCount {
            column: name.to_string(),
            nulls: records.iter().filter(|r| r.text(role).is_none()).count(),
        })
        .collect()
}
