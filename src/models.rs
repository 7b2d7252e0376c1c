//! Core data structures for catalog analysis.
//!
//! Defines the record and table types that flow between the pipeline
//! stages. Derived tables live next to the stage that produces them.

use crate::constants::{CATEGORY_MOVIE, CATEGORY_TV_SHOW, columns};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Movie / TV Show classification of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Movie,
    TvShow,
    /// Any label outside the two known ones, kept verbatim
    Other(String),
}

impl Category {
    /// Map a raw cell onto a category. Matching is exact.
    pub fn parse(raw: &str) -> Self {
        match raw {
            CATEGORY_MOVIE => Category::Movie,
            CATEGORY_TV_SHOW => Category::TvShow,
            other => Category::Other(other.to_string()),
        }
    }

    /// Label as it appears in the source file
    pub fn label(&self) -> &str {
        match self {
            Category::Movie => CATEGORY_MOVIE,
            Category::TvShow => CATEGORY_TV_SHOW,
            Category::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a header column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Category,
    Director,
    Cast,
    Country,
    ReleaseDate,
    Rating,
    ListedIn,
    Duration,
    /// Uninterpreted column, index into [`CatalogRecord::extra`]
    Extra(usize),
}

impl ColumnRole {
    /// Role of a known header name, `None` for anything else
    pub fn for_header(name: &str) -> Option<Self> {
        match name {
            columns::CATEGORY => Some(ColumnRole::Category),
            columns::DIRECTOR => Some(ColumnRole::Director),
            columns::CAST => Some(ColumnRole::Cast),
            columns::COUNTRY => Some(ColumnRole::Country),
            columns::RELEASE_DATE => Some(ColumnRole::ReleaseDate),
            columns::RATING => Some(ColumnRole::Rating),
            columns::LISTED_IN => Some(ColumnRole::ListedIn),
            columns::DURATION => Some(ColumnRole::Duration),
            _ => None,
        }
    }
}

/// Column layout of a loaded catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogSchema {
    /// Header names in file order
    pub headers: Vec<String>,

    /// Role of each header, aligned with `headers`
    pub roles: Vec<ColumnRole>,

    /// Whether the file carries a Listed_in column
    pub has_listed_in: bool,
}

impl CatalogSchema {
    /// Build the layout from a header row.
    ///
    /// A repeated uninterpreted header gets a numeric suffix (`Title`,
    /// `Title.1`, `Title.2`) so every column name is unique.
    pub fn from_headers(headers: Vec<String>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
        let mut unique_headers = Vec::with_capacity(headers.len());
        let mut roles = Vec::with_capacity(headers.len());
        let mut extra_index = 0;

        for name in headers {
            let (name, role) = match ColumnRole::for_header(&name) {
                Some(role) => (name, role),
                None => {
                    let role = ColumnRole::Extra(extra_index);
                    extra_index += 1;
                    (unique_header_name(name, &seen), role)
                }
            };
            seen.insert(name.clone());
            unique_headers.push(name);
            roles.push(role);
        }

        let has_listed_in = roles.contains(&ColumnRole::ListedIn);

        Self {
            headers: unique_headers,
            roles,
            has_listed_in,
        }
    }

    /// Number of columns in the source file
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of uninterpreted columns
    pub fn extra_count(&self) -> usize {
        self.roles
            .iter()
            .filter(|role| matches!(role, ColumnRole::Extra(_)))
            .count()
    }

    /// Iterate `(header, role)` pairs in file order
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnRole)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.roles.iter().copied())
    }
}

fn unique_header_name(name: String, seen: &HashSet<String>) -> String {
    if !seen.contains(&name) {
        return name;
    }

    let mut suffix = 1;
    loop {
        let candidate = format!("{}.{}", name, suffix);
        if !seen.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CatalogRecord {
    pub category: Option<Category>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    /// Release_Date as written in the file
    pub release_date_raw: Option<String>,
    /// Parsed Release_Date, set by the cleaner
    pub release_date: Option<NaiveDate>,
    /// Calendar year of `release_date`, set by the cleaner
    pub year: Option<i32>,
    pub rating: Option<String>,
    pub listed_in: Option<String>,
    pub duration: Option<String>,
    /// Values of the uninterpreted columns, in schema order
    pub extra: Vec<Option<String>>,
}

impl CatalogRecord {
    /// Text value of a column. Release_Date yields the raw text.
    pub fn text(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Category => self.category.as_ref().map(Category::label),
            ColumnRole::Director => self.director.as_deref(),
            ColumnRole::Cast => self.cast.as_deref(),
            ColumnRole::Country => self.country.as_deref(),
            ColumnRole::ReleaseDate => self.release_date_raw.as_deref(),
            ColumnRole::Rating => self.rating.as_deref(),
            ColumnRole::ListedIn => self.listed_in.as_deref(),
            ColumnRole::Duration => self.duration.as_deref(),
            ColumnRole::Extra(index) => self.extra.get(index).and_then(|v| v.as_deref()),
        }
    }

    /// Store a raw cell into the slot its column maps to
    pub fn set_text(&mut self, role: ColumnRole, value: Option<String>) {
        match role {
            ColumnRole::Category => self.category = value.as_deref().map(Category::parse),
            ColumnRole::Director => self.director = value,
            ColumnRole::Cast => self.cast = value,
            ColumnRole::Country => self.country = value,
            ColumnRole::ReleaseDate => self.release_date_raw = value,
            ColumnRole::Rating => self.rating = value,
            ColumnRole::ListedIn => self.listed_in = value,
            ColumnRole::Duration => self.duration = value,
            ColumnRole::Extra(index) => {
                if self.extra.len() <= index {
                    self.extra.resize(index + 1, None);
                }
                self.extra[index] = value;
            }
        }
    }

    pub fn is_movie(&self) -> bool {
        self.category == Some(Category::Movie)
    }
}

/// Loaded catalog: column layout plus ordered records
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub schema: CatalogSchema,
    pub records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn new(schema: CatalogSchema, records: Vec<CatalogRecord>) -> Self {
        Self { schema, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the layout with a different record set
    pub fn with_records(&self, records: Vec<CatalogRecord>) -> Self {
        Self {
            schema: self.schema.clone(),
            records,
        }
    }
}
