//! Polars bridge for cleaned catalogs.
//!
//! Converts the cleaned table and the year/category matrix into
//! `DataFrame`s and writes the table to Parquet.

use crate::aggregator::YearCategoryMatrix;
use crate::config::CompressionAlgorithm;
use crate::constants::columns;
use crate::error::Result;
use crate::models::{Catalog, ColumnRole};
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, ParquetWriter};
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// Name of the derived year column when the source has none of its own
const DERIVED_YEAR_FALLBACK: &str = "Derived_Year";

/// Cleaned catalog as a `DataFrame`.
///
/// Columns keep the file order. Release_Date holds the parsed date (null
/// when unparseable) and a derived `Year` column is appended.
pub fn catalog_to_dataframe(catalog: &Catalog) -> Result<DataFrame> {
    let records = &catalog.records;
    let mut frame_columns = Vec::with_capacity(catalog.schema.width() + 1);

    for (name, role) in catalog.schema.columns() {
        let column = match role {
            ColumnRole::ReleaseDate => {
                let dates: Vec<Option<NaiveDate>> =
                    records.iter().map(|r| r.release_date).collect();
                Column::new(name.into(), dates)
            }
            _ => {
                let values: Vec<Option<&str>> = records.iter().map(|r| r.text(role)).collect();
                Column::new(name.into(), values)
            }
        };
        frame_columns.push(column);
    }

    let year_name = if catalog.schema.headers.iter().any(|h| h == columns::YEAR) {
        DERIVED_YEAR_FALLBACK
    } else {
        columns::YEAR
    };
    let years: Vec<Option<i32>> = records.iter().map(|r| r.year).collect();
    frame_columns.push(Column::new(year_name.into(), years));

    let frame = DataFrame::new(frame_columns)?;
    debug!(
        "Built catalog frame: {} rows x {} columns",
        frame.height(),
        frame.width()
    );
    Ok(frame)
}

/// Wide year/category table: one row per year, one count column per category
pub fn year_category_to_dataframe(matrix: &YearCategoryMatrix) -> Result<DataFrame> {
    let years = matrix.years();
    let mut frame_columns = Vec::with_capacity(matrix.categories().len() + 1);
    frame_columns.push(Column::new(columns::YEAR.into(), years.clone()));

    for category in matrix.categories() {
        let counts: Vec<u64> = years
            .iter()
            .map(|&year| matrix.count(year, category) as u64)
            .collect();
        frame_columns.push(Column::new(category.as_str().into(), counts));
    }

    Ok(DataFrame::new(frame_columns)?)
}

/// Write the cleaned catalog to a Parquet file, returning the row count
pub fn export_parquet(
    catalog: &Catalog,
    output_path: &Path,
    compression: CompressionAlgorithm,
) -> Result<usize> {
    let mut frame = catalog_to_dataframe(catalog)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    ParquetWriter::new(file)
        .with_compression(compression.to_polars_compression())
        .finish(&mut frame)?;

    info!(
        "Exported {} rows to {}",
        frame.height(),
        output_path.display()
    );
    Ok(frame.height())
}
