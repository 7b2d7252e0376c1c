//! Full pipeline runs over well-formed catalogs

use super::{write_catalog, write_raw};
use crate::config::AnalysisConfig;
use crate::loader::load_catalog_from_reader;
use crate::pipeline::{CatalogPipeline, analyze};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_five_row_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog(
        &temp_dir,
        &[
            "s1,Movie,Alpha,Dir A,Cast A,United States,\"January 1, 2020\",PG,90 min,Dramas",
            "s2,Movie,Beta,,Cast B,India,\"March 5, 2019\",TV-MA,120 min,\"Comedies, Dramas\"",
            "s3,Movie,Gamma,Dir C,,United States,\"June 9, 2020\",,NA,Documentaries",
            "s4,TV Show,Delta,,,Japan,\"July 7, 2018\",TV-14,2 Seasons,Anime Series",
            "s4,TV Show,Delta,,,Japan,\"July 7, 2018\",TV-14,2 Seasons,Anime Series",
        ],
    );

    let output = CatalogPipeline::new(&path).unwrap().run().unwrap();
    let summary = &output.summary;

    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.movies(), 3);
    assert_eq!(summary.tv_shows(), 1);
    assert_eq!(output.durations.minutes, vec![90, 120]);
    assert_eq!(output.durations.rejected, 1);
    assert_eq!(summary.rejected_durations, 1);
    assert_eq!(summary.min_year, Some(2018));
    assert_eq!(summary.max_year, Some(2020));
    assert_eq!(summary.top_genres.keys()[0], "Dramas");
    assert_eq!(summary.top_genres.get("Dramas"), Some(2));
    assert_eq!(summary.top_countries.keys()[0], "United States");

    assert_eq!(output.load_report.shape(), (5, 10));
    assert_eq!(output.cleaning_report.duplicates_removed, 1);
    assert_eq!(output.cleaning_report.ratings_filled, 1);
    assert_eq!(output.catalog.records[2].rating.as_deref(), Some("PG"));
    assert_eq!(output.catalog.records[1].director.as_deref(), Some("Unknown"));
}

#[test]
fn test_year_matrix_excludes_unparseable_dates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog(
        &temp_dir,
        &[
            "s1,Movie,A,D,C,US,\"January 1, 2020\",PG,90 min,Dramas",
            "s2,Movie,B,D,C,US,,PG,95 min,Dramas",
            "s3,TV Show,C,D,C,US,not a date,PG,1 Season,Dramas",
            "s4,TV Show,D,D,C,US,\"February 2, 2020\",PG,1 Season,Dramas",
        ],
    );

    let output = CatalogPipeline::new(&path).unwrap().run().unwrap();
    let matrix = &output.summary.year_category;

    assert_eq!(matrix.years(), vec![2020]);
    assert_eq!(matrix.count(2020, "Movie"), 1);
    assert_eq!(matrix.count(2020, "TV Show"), 1);
    assert_eq!(matrix.total(), 2);
    assert_eq!(output.cleaning_report.missing_dates, 1);
    assert_eq!(output.cleaning_report.unparseable_dates, 1);
}

#[test]
fn test_summary_slices_top_five() {
    let temp_dir = TempDir::new().unwrap();
    let rows: Vec<String> = (0..8)
        .flat_map(|country| {
            // Country k appears k + 1 times
            (0..=country).map(move |copy| {
                format!(
                    "s{}-{},Movie,T,D,C,Country {},2019-01-01,PG,100 min,\"Genre {}, Shared\"",
                    country, copy, country, country
                )
            })
        })
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let path = write_catalog(&temp_dir, &row_refs);

    let output = CatalogPipeline::new(&path).unwrap().run().unwrap();

    assert_eq!(output.aggregates.countries.len(), 8);
    assert_eq!(output.summary.top_countries.len(), 5);
    assert_eq!(
        output.summary.top_countries.keys(),
        vec!["Country 7", "Country 6", "Country 5", "Country 4", "Country 3"]
    );
    assert_eq!(output.summary.top_genres.keys()[0], "Shared");
    assert_eq!(output.summary.top_genres.get("Shared"), Some(36));
    assert_eq!(output.summary.top_genres.len(), 5);
}

#[test]
fn test_catalog_without_listed_in() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_raw(
        &temp_dir,
        "Show_Id,Category,Title,Director,Cast,Country,Release_Date,Rating,Duration,Type\n\
         s1,Movie,A,D,C,US,\"May 1, 2021\",PG,90 min,Dramas\n\
         s2,TV Show,B,D,C,UK,\"May 2, 2021\",PG,1 Season,Comedies\n",
    );

    let output = CatalogPipeline::new(&path).unwrap().run().unwrap();

    assert!(output.summary.top_genres.is_empty());
    assert_eq!(output.summary.top_countries.len(), 2);
    assert_eq!(output.summary.total_records, 2);
}

#[test]
fn test_custom_config_flows_through() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog(
        &temp_dir,
        &[
            "s1,Movie,A,,C,US,2020-01-01,PG,90 min,\"Dramas, Thrillers, Horror\"",
            "s2,Movie,B,D,C,UK,2020-01-01,PG,90 min,Dramas",
            "s3,Movie,C,D,C,FR,2020-01-01,PG,90 min,Thrillers",
        ],
    );
    let config = AnalysisConfig::default()
        .with_top_n(2)
        .with_summary_top_n(1)
        .with_fill_value("Not Given");

    let output = CatalogPipeline::new(&path)
        .unwrap()
        .with_config(config)
        .run()
        .unwrap();

    assert_eq!(output.aggregates.genres.keys(), vec!["Dramas", "Thrillers"]);
    assert_eq!(output.aggregates.countries.len(), 2);
    assert_eq!(output.summary.top_genres.keys(), vec!["Dramas"]);
    assert_eq!(
        output.catalog.records[0].director.as_deref(),
        Some("Not Given")
    );
}

#[test]
fn test_analyze_in_memory_catalog() {
    let content = format!(
        "{}\n{}\n{}\n",
        super::HEADER,
        "s1,Movie,A,D,C,US,\"August 14, 2020\",R,101 min,Dramas",
        "s2,Movie,B,D,C,US,\"August 15, 2020\",R,min,Dramas",
    );
    let config = AnalysisConfig::default();
    let (catalog, report) =
        load_catalog_from_reader(content.as_bytes(), Path::new("memory.csv"), &config).unwrap();

    let output = analyze(&catalog, report, &config).unwrap();

    assert_eq!(output.durations.minutes, vec![101]);
    assert_eq!(output.durations.rejected, 1);
    assert_eq!(output.summary.movie_durations.unwrap().max, 101);
}

#[test]
fn test_pipeline_keeps_path_and_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog(&temp_dir, &["s1,Movie,A,D,C,US,2020-01-01,PG,90 min,Dramas"]);
    let config = AnalysisConfig::default().with_top_n(7).with_histogram_bins(5);

    let pipeline = CatalogPipeline::new(&path).unwrap().with_config(config.clone());

    assert_eq!(pipeline.input_path(), path.as_path());
    assert_eq!(pipeline.config(), &config);

    let output = pipeline.run().unwrap();
    assert_eq!(output.summary.duration_histogram.len(), 5);
}
