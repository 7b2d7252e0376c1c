//! Catalog cleaning.
//!
//! Turns a loaded catalog into the cleaned table the aggregates run on:
//!
//! 1. **Deduplication**: exact full-row duplicates are dropped, first wins
//! 2. **People and country fill**: missing Director, Cast and Country cells
//!    get the configured placeholder
//! 3. **Rating fill**: missing Rating cells get the dataset's most common rating
//! 4. **Dates**: Release_Date is parsed and Year derived from it
//!
//! Cleaning is a pure transformation and leaves the input catalog untouched.
//! Deduplication runs before the fills, so two rows that differ only by a
//! missing cell and the value that later fills it both survive the first
//! pass. A second pass then sees them as duplicates and drops one. Apart
//! from that case, cleaning an already cleaned catalog changes nothing.

pub mod dates;
pub mod deduplication;

pub use dates::parse_release_date;
pub use deduplication::deduplicate_records;

use crate::config::AnalysisConfig;
use crate::error::{CatalogError, Result};
use crate::frequency::FrequencyTable;
use crate::models::{Catalog, CatalogRecord};
use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, info};

/// What cleaning changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub rows_out: usize,
    pub directors_filled: usize,
    pub cast_filled: usize,
    pub countries_filled: usize,
    pub ratings_filled: usize,
    /// Rating used to fill missing ratings
    pub rating_mode: String,
    /// Rows without any Release_Date text
    pub missing_dates: usize,
    /// Rows whose Release_Date text could not be parsed
    pub unparseable_dates: usize,
}

impl CleaningReport {
    /// Rows whose Year ended up null
    pub fn rows_without_year(&self) -> usize {
        self.missing_dates + self.unparseable_dates
    }
}

/// Clean a catalog, returning a new one alongside a report
pub fn clean(catalog: &Catalog, config: &AnalysisConfig) -> Result<(Catalog, CleaningReport)> {
    let (mut records, duplicates_removed) = deduplicate_records(&catalog.records);

    if records.is_empty() {
        return Err(CatalogError::empty_dataset(
            "no records left after loading and deduplication",
        ));
    }

    let mut report = CleaningReport {
        rows_in: catalog.len(),
        duplicates_removed,
        rows_out: records.len(),
        ..Default::default()
    };

    let rating_mode = rating_mode(&records).ok_or_else(|| {
        CatalogError::empty_dataset("no non-null Rating values to derive a default from")
    })?;
    debug!("Rating mode: {}", rating_mode);

    for record in &mut records {
        report.directors_filled += fill_missing(&mut record.director, &config.fill_value);
        report.cast_filled += fill_missing(&mut record.cast, &config.fill_value);
        report.countries_filled += fill_missing(&mut record.country, &config.fill_value);
        report.ratings_filled += fill_missing(&mut record.rating, &rating_mode);

        derive_dates(record, &config.date_formats, &mut report);
    }

    report.rating_mode = rating_mode;

    info!(
        "Cleaning complete: {} duplicates removed, {} rows remaining, {} without a usable date",
        report.duplicates_removed,
        report.rows_out,
        report.rows_without_year()
    );

    Ok((catalog.with_records(records), report))
}

/// Most frequent non-null rating; on a tie the earliest seen wins
pub fn rating_mode(records: &[CatalogRecord]) -> Option<String> {
    FrequencyTable::from_values(records.iter().filter_map(|r| r.rating.as_deref()))
        .most_frequent()
        .map(|entry| entry.key.clone())
}

fn fill_missing(slot: &mut Option<String>, fill_value: &str) -> usize {
    if slot.is_some() {
        return 0;
    }
    *slot = Some(fill_value.to_string());
    1
}

fn derive_dates(record: &mut CatalogRecord, formats: &[String], report: &mut CleaningReport) {
    record.release_date = match record.release_date_raw.as_deref() {
        Some(raw) => {
            let parsed = parse_release_date(raw, formats);
            if parsed.is_none() {
                debug!("Unparseable Release_Date: {:?}", raw);
                report.unparseable_dates += 1;
            }
            parsed
        }
        None => {
            report.missing_dates += 1;
            None
        }
    };
    record.year = record.release_date.map(|date| date.year());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CatalogSchema};

    fn record(category: Category, rating: Option<&str>, date: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            category: Some(category),
            rating: rating.map(str::to_string),
            release_date_raw: date.map(str::to_string),
            duration: Some("90 min".to_string()),
            ..Default::default()
        }
    }

    fn catalog(records: Vec<CatalogRecord>) -> Catalog {
        Catalog::new(CatalogSchema::default(), records)
    }

    #[test]
    fn test_fills_people_and_country() {
        let mut with_values = record(Category::Movie, Some("PG"), None);
        with_values.director = Some("Ava DuVernay".to_string());
        let input = catalog(vec![with_values, record(Category::TvShow, Some("PG"), None)]);

        let (cleaned, report) = clean(&input, &AnalysisConfig::default()).unwrap();

        assert_eq!(cleaned.records[0].director.as_deref(), Some("Ava DuVernay"));
        assert_eq!(cleaned.records[1].director.as_deref(), Some("Unknown"));
        assert_eq!(cleaned.records[0].cast.as_deref(), Some("Unknown"));
        assert_eq!(cleaned.records[1].country.as_deref(), Some("Unknown"));
        assert_eq!(report.directors_filled, 1);
        assert_eq!(report.cast_filled, 2);
        assert_eq!(report.countries_filled, 2);
    }

    #[test]
    fn test_custom_fill_value() {
        let input = catalog(vec![record(Category::Movie, Some("PG"), None)]);
        let config = AnalysisConfig::default().with_fill_value("n/a");

        let (cleaned, _) = clean(&input, &config).unwrap();
        assert_eq!(cleaned.records[0].country.as_deref(), Some("n/a"));
    }

    #[test]
    fn test_rating_mode_tie_break() {
        let input = catalog(
            ["PG", "PG", "TV-MA", "TV-MA"]
                .iter()
                .enumerate()
                .map(|(i, rating)| {
                    let mut r = record(Category::Movie, Some(*rating), None);
                    r.extra = vec![Some(i.to_string())];
                    r
                })
                .chain(std::iter::once(record(Category::Movie, None, None)))
                .collect(),
        );

        let (cleaned, report) = clean(&input, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.rating_mode, "PG");
        assert_eq!(report.ratings_filled, 1);
        assert_eq!(cleaned.records[4].rating.as_deref(), Some("PG"));
    }

    #[test]
    fn test_rating_mode_uses_deduplicated_rows() {
        // Three identical TV-MA rows count once after deduplication
        let input = catalog(vec![
            record(Category::Movie, Some("TV-MA"), None),
            record(Category::Movie, Some("TV-MA"), None),
            record(Category::Movie, Some("TV-MA"), None),
            record(Category::TvShow, Some("R"), None),
            record(Category::Movie, Some("R"), None),
        ]);

        let (_, report) = clean(&input, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.duplicates_removed, 2);
        assert_eq!(report.rating_mode, "R");
    }

    #[test]
    fn test_year_derivation() {
        let input = catalog(vec![
            record(Category::Movie, Some("PG"), Some("January 1, 2020")),
            record(Category::Movie, Some("PG"), Some("")),
            record(Category::Movie, Some("PG"), Some("not a date")),
            record(Category::TvShow, Some("PG"), None),
        ]);

        let (cleaned, report) = clean(&input, &AnalysisConfig::default()).unwrap();

        assert_eq!(cleaned.records[0].year, Some(2020));
        assert!(cleaned.records[0].release_date.is_some());
        assert_eq!(cleaned.records[1].year, None);
        assert_eq!(cleaned.records[2].year, None);
        assert_eq!(cleaned.records[3].year, None);
        assert_eq!(report.unparseable_dates, 2);
        assert_eq!(report.missing_dates, 1);
        assert_eq!(report.rows_without_year(), 3);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = catalog(vec![
            record(Category::Movie, None, None),
            record(Category::Movie, Some("G"), None),
        ]);
        let before = input.clone();

        let _ = clean(&input, &AnalysisConfig::default()).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let input = catalog(vec![
            record(Category::Movie, None, Some("March 4, 2018")),
            record(Category::Movie, None, Some("March 4, 2018")),
            record(Category::TvShow, Some("TV-14"), Some("garbage")),
            record(Category::Movie, Some("TV-14"), None),
        ]);
        let config = AnalysisConfig::default();

        let (once, _) = clean(&input, &config).unwrap();
        let (twice, report) = clean(&once, &config).unwrap();

        assert_eq!(once, twice);
        assert_eq!(report.duplicates_removed, 0);
        assert_eq!(report.directors_filled, 0);
        assert_eq!(report.ratings_filled, 0);
    }

    #[test]
    fn test_fill_created_duplicates_removed_on_second_pass() {
        let mut missing_director = record(Category::Movie, Some("PG"), Some("May 1, 2021"));
        missing_director.extra = vec![Some("s1".to_string())];
        let mut unknown_director = missing_director.clone();
        unknown_director.director = Some("Unknown".to_string());
        let input = catalog(vec![missing_director, unknown_director]);
        let config = AnalysisConfig::default();

        let (once, first) = clean(&input, &config).unwrap();
        assert_eq!(first.duplicates_removed, 0);
        assert_eq!(once.len(), 2);
        assert_eq!(once.records[0], once.records[1]);

        let (twice, second) = clean(&once, &config).unwrap();
        assert_eq!(second.duplicates_removed, 1);
        assert_eq!(twice.len(), 1);

        let (thrice, third) = clean(&twice, &config).unwrap();
        assert_eq!(third.duplicates_removed, 0);
        assert_eq!(twice, thrice);
    }

    #[test]
    fn test_empty_catalog_fails() {
        let error = clean(&catalog(Vec::new()), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(error, CatalogError::EmptyDataset { .. }));
    }

    #[test]
    fn test_all_ratings_missing_fails() {
        let input = catalog(vec![record(Category::Movie, None, None)]);
        let error = clean(&input, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(error, CatalogError::EmptyDataset { .. }));
    }
}
