//! Movie duration extraction.
//!
//! Movie rows store their runtime as text such as `"90 min"`. This module
//! pulls the minutes out of that text. Rows that do not follow the pattern
//! are counted and left out of the result; the catalog itself is not
//! touched.

use crate::constants::DURATION_MINUTES_SUFFIX;
use crate::models::CatalogRecord;
use serde::Serialize;
use tracing::debug;

/// Minutes of every movie with a well-formed duration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DurationExtraction {
    /// Parsed runtimes, in catalog order
    pub minutes: Vec<u64>,

    /// Movie rows whose duration was missing or not `<digits> min`
    pub rejected: usize,
}

/// Descriptive statistics of movie runtimes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

/// One equal-width histogram bucket, `[lower, upper)`; the last one is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl DurationExtraction {
    /// Movie rows inspected, accepted or not
    pub fn movies_considered(&self) -> usize {
        self.minutes.len() + self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Summary statistics, `None` when no runtime was extracted
    pub fn stats(&self) -> Option<DurationStats> {
        let min = *self.minutes.iter().min()?;
        let max = *self.minutes.iter().max()?;
        let count = self.minutes.len();
        let sum: u128 = self.minutes.iter().map(|&m| u128::from(m)).sum();

        let mut sorted = self.minutes.clone();
        sorted.sort_unstable();
        let median = if count % 2 == 1 {
            sorted[count / 2] as f64
        } else {
            (sorted[count / 2 - 1] as f64 + sorted[count / 2] as f64) / 2.0
        };

        Some(DurationStats {
            count,
            min,
            max,
            mean: sum as f64 / count as f64,
            median,
        })
    }

    /// Equal-width histogram over `[min, max]` with `bins` buckets.
    ///
    /// When every runtime is the same the range is widened to
    /// `[value - 0.5, value + 0.5]`.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let (Some(&min), Some(&max)) = (self.minutes.iter().min(), self.minutes.iter().max())
        else {
            return Vec::new();
        };
        if bins == 0 {
            return Vec::new();
        }

        let (low, high) = if min == max {
            (min as f64 - 0.5, max as f64 + 0.5)
        } else {
            (min as f64, max as f64)
        };
        let width = (high - low) / bins as f64;

        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: low + width * i as f64,
                upper: if i + 1 == bins {
                    high
                } else {
                    low + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for &minutes in &self.minutes {
            let offset = (minutes as f64 - low) / width;
            let index = (offset.floor() as usize).min(bins - 1);
            histogram[index].count += 1;
        }

        histogram
    }
}

/// Minutes in a `"<digits> min"` duration.
///
/// Only an exact trailing `" min"` is stripped. Whatever remains must be a
/// non-empty run of ASCII digits that fits in a `u64`.
pub fn parse_minutes(duration: &str) -> Option<u64> {
    let digits = duration
        .strip_suffix(DURATION_MINUTES_SUFFIX)
        .unwrap_or(duration);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

/// Runtimes of the movie rows, skipping malformed durations
pub fn extract_movie_durations(records: &[CatalogRecord]) -> DurationExtraction {
    let mut extraction = DurationExtraction::default();

    for record in records.iter().filter(|r| r.is_movie()) {
        match record.duration.as_deref().and_then(parse_minutes) {
            Some(minutes) => extraction.minutes.push(minutes),
            None => {
                debug!("Rejected movie duration {:?}", record.duration);
                extraction.rejected += 1;
            }
        }
    }

    debug!(
        "Extracted {} movie durations, rejected {}",
        extraction.minutes.len(),
        extraction.rejected
    );

    extraction
}
