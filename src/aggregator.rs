//! Descriptive aggregates over a cleaned catalog.
//!
//! Every query borrows the catalog and returns a fresh table; nothing here
//! mutates records or keeps state between calls.

use crate::config::AnalysisConfig;
use crate::constants::GENRE_SEPARATOR;
use crate::frequency::FrequencyTable;
use crate::models::Catalog;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Title counts per (year, category)
///
/// Years are kept in ascending order, categories in first-seen order. A
/// year/category pair without titles reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearCategoryMatrix {
    categories: Vec<String>,
    counts: BTreeMap<i32, BTreeMap<String, usize>>,
}

impl YearCategoryMatrix {
    /// Record one title of `category` in `year`
    fn add(&mut self, year: i32, category: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
        *self
            .counts
            .entry(year)
            .or_default()
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    /// Count for a year/category pair, zero when absent
    pub fn count(&self, year: i32, category: &str) -> usize {
        self.counts
            .get(&year)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or(0)
    }

    /// Years with at least one title, ascending
    pub fn years(&self) -> Vec<i32> {
        self.counts.keys().copied().collect()
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Zero-filled counts of one year, in [`categories`](Self::categories) order
    pub fn row(&self, year: i32) -> Vec<usize> {
        self.categories
            .iter()
            .map(|category| self.count(year, category))
            .collect()
    }

    /// Titles of one year across all categories
    pub fn year_total(&self, year: i32) -> usize {
        self.counts
            .get(&year)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    /// Earliest and latest year present
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.counts.keys().next()?;
        let last = self.counts.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn total(&self) -> usize {
        self.counts.values().flat_map(|row| row.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// All aggregate tables of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    pub categories: FrequencyTable,
    pub countries: FrequencyTable,
    pub genres: FrequencyTable,
    pub year_category: YearCategoryMatrix,
}

/// Read-only query interface over a cleaned catalog
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Aggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Titles per category; rows without a category are not counted
    pub fn count_by_category(&self) -> FrequencyTable {
        FrequencyTable::from_values(
            self.catalog
                .records
                .iter()
                .filter_map(|r| r.category.as_ref().map(|c| c.label())),
        )
    }

    /// Titles per raw Country value, truncated to `top_n`.
    ///
    /// Multi-country strings such as `"India, United States"` form their
    /// own bucket.
    pub fn count_by_country(&self, top_n: usize) -> FrequencyTable {
        FrequencyTable::from_values(
            self.catalog
                .records
                .iter()
                .filter_map(|r| r.country.as_deref()),
        )
        .truncated(top_n)
    }

    /// Genre occurrences from Listed_in, truncated to `top_n`.
    ///
    /// A title listed under N genres adds one to each of them. Catalogs
    /// without a Listed_in column yield an empty table.
    pub fn count_by_genre(&self, top_n: usize) -> FrequencyTable {
        if !self.catalog.schema.has_listed_in {
            debug!("No Listed_in column, skipping genre aggregation");
            return FrequencyTable::default();
        }

        FrequencyTable::from_values(
            self.catalog
                .records
                .iter()
                .filter_map(|r| r.listed_in.as_deref())
                .flat_map(|listed| listed.split(GENRE_SEPARATOR))
                .map(str::trim)
                .filter(|genre| !genre.is_empty()),
        )
        .truncated(top_n)
    }

    /// Titles per year and category, over rows with a known year
    pub fn count_by_year_and_category(&self) -> YearCategoryMatrix {
        let mut matrix = YearCategoryMatrix::default();

        for record in &self.catalog.records {
            if let (Some(year), Some(category)) = (record.year, record.category.as_ref()) {
                matrix.add(year, category.label());
            }
        }

        matrix
    }

    /// Run every query with the configured table sizes
    pub fn aggregate(&self, config: &AnalysisConfig) -> Aggregates {
        let aggregates = Aggregates {
            categories: self.count_by_category(),
            countries: self.count_by_country(config.country_top_n),
            genres: self.count_by_genre(config.genre_top_n),
            year_category: self.count_by_year_and_category(),
        };

        debug!(
            "Aggregated {} categories, {} countries, {} genres, {} years",
            aggregates.categories.len(),
            aggregates.countries.len(),
            aggregates.genres.len(),
            aggregates.year_category.years().len()
        );

        aggregates
    }
}
