//! Column names, default values and parsing conventions for catalog files.

// =============================================================================
// Column Names
// =============================================================================

/// Header names of the columns the pipeline interprets
pub mod columns {
    pub const CATEGORY: &str = "Category";
    pub const DIRECTOR: &str = "Director";
    pub const CAST: &str = "Cast";
    pub const COUNTRY: &str = "Country";
    pub const RELEASE_DATE: &str = "Release_Date";
    pub const RATING: &str = "Rating";
    pub const DURATION: &str = "Duration";
    pub const LISTED_IN: &str = "Listed_in";

    /// Derived column added by the cleaner
    pub const YEAR: &str = "Year";
}

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: &[&str] = &[
    columns::CATEGORY,
    columns::DIRECTOR,
    columns::CAST,
    columns::COUNTRY,
    columns::RELEASE_DATE,
    columns::RATING,
    columns::DURATION,
];

// =============================================================================
// Category Labels
// =============================================================================

pub const CATEGORY_MOVIE: &str = "Movie";
pub const CATEGORY_TV_SHOW: &str = "TV Show";

// =============================================================================
// Cleaning Defaults
// =============================================================================

/// Placeholder written into missing Director, Cast and Country cells
pub const DEFAULT_FILL_VALUE: &str = "Unknown";

/// Cell texts read as missing values (same list pandas uses by default)
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Accepted Release_Date layouts, tried in order
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // January 1, 2020
    "%b %d, %Y", // Jan 1, 2020
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

// =============================================================================
// Aggregation Defaults
// =============================================================================

pub const DEFAULT_GENRE_TOP_N: usize = 10;
pub const DEFAULT_COUNTRY_TOP_N: usize = 10;
pub const DEFAULT_SUMMARY_TOP_N: usize = 5;

/// Separator between genres in the Listed_in column
pub const GENRE_SEPARATOR: char = ',';

// =============================================================================
// Duration Parsing
// =============================================================================

/// Suffix stripped from movie durations before numeric parsing
pub const DURATION_MINUTES_SUFFIX: &str = " min";

/// Bucket count of the movie duration histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

// =============================================================================
// Input
// =============================================================================

pub const DEFAULT_INPUT_FILE: &str = "netflix_titles.csv";
pub const FIELD_DELIMITER: u8 = b',';
