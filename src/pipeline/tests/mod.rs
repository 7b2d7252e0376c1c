//! Scenario tests for the analysis pipeline
//!
//! Each test writes a small catalog CSV into a temporary directory and runs
//! the full pipeline over it.

pub mod end_to_end;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub(crate) const HEADER: &str =
    "Show_Id,Category,Title,Director,Cast,Country,Release_Date,Rating,Duration,Listed_in";

/// Write `rows` under the standard header and return the file path
pub(crate) fn write_catalog(temp_dir: &TempDir, rows: &[&str]) -> PathBuf {
    write_raw(temp_dir, &format!("{}\n{}\n", HEADER, rows.join("\n")))
}

/// Write arbitrary content as the catalog file
pub(crate) fn write_raw(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("catalog.csv");
    fs::write(&path, content).unwrap();
    path
}
