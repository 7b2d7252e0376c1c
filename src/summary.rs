//! Final run summary.
//!
//! [`Summary`] is the one artifact handed to presentation code. It is built
//! from values the earlier stages return and does no printing itself.

use crate::aggregator::{Aggregates, YearCategoryMatrix};
use crate::config::AnalysisConfig;
use crate::durations::{DurationExtraction, DurationStats, HistogramBin};
use crate::frequency::FrequencyTable;
use crate::models::{Catalog, Category};
use serde::Serialize;

/// Headline figures of a cleaned catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Records left after cleaning
    pub total_records: usize,

    /// Titles per category
    pub categories: FrequencyTable,

    /// Highest-count genres
    pub top_genres: FrequencyTable,

    /// Highest-count countries
    pub top_countries: FrequencyTable,

    /// Earliest release year seen
    pub min_year: Option<i32>,

    /// Latest release year seen
    pub max_year: Option<i32>,

    /// Movie runtime statistics, if any runtime was parsed
    pub movie_durations: Option<DurationStats>,

    /// Movie rows whose duration could not be read
    pub rejected_durations: usize,

    /// Equal-width runtime buckets, empty when no runtime was parsed
    pub duration_histogram: Vec<HistogramBin>,

    /// Titles per year and category
    pub year_category: YearCategoryMatrix,
}

impl Summary {
    pub fn movies(&self) -> usize {
        self.categories
            .get(Category::Movie.label())
            .unwrap_or(0)
    }

    pub fn tv_shows(&self) -> usize {
        self.categories
            .get(Category::TvShow.label())
            .unwrap_or(0)
    }
}

/// Assemble the summary from the cleaned catalog and the stage outputs.
///
/// `config.summary_top_n` bounds the genre and country lists and
/// `config.histogram_bins` sets the runtime bucket count.
pub fn build_summary(
    catalog: &Catalog,
    aggregates: &Aggregates,
    durations: &DurationExtraction,
    config: &AnalysisConfig,
) -> Summary {
    let top_n = config.summary_top_n;
    let years = catalog.records.iter().filter_map(|r| r.year);

    Summary {
        total_records: catalog.len(),
        categories: aggregates.categories.clone(),
        top_genres: aggregates.genres.top(top_n),
        top_countries: aggregates.countries.top(top_n),
        min_year: years.clone().min(),
        max_year: years.max(),
        movie_durations: durations.stats(),
        rejected_durations: durations.rejected,
        duration_histogram: durations.histogram(config.histogram_bins),
        year_category: aggregates.year_category.clone(),
    }
}
