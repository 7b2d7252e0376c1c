//! Command-line interface components.

use crate::config::{AnalysisConfig, CompressionAlgorithm};
use crate::constants::{DEFAULT_GENRE_TOP_N, DEFAULT_INPUT_FILE, DEFAULT_SUMMARY_TOP_N};
use crate::durations::HistogramBin;
use crate::frame::export_parquet;
use crate::frequency::FrequencyTable;
use crate::pipeline::{CatalogPipeline, PipelineOutput};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-insights")]
#[command(about = "Clean a media catalog CSV and summarise its content mix")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the catalog CSV file
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Number of genres and countries kept in the aggregate tables
    #[arg(long, default_value_t = DEFAULT_GENRE_TOP_N)]
    pub top_n: usize,

    /// Number of genres and countries shown in the summary (default 5, capped at --top-n)
    #[arg(long)]
    pub summary_top_n: Option<usize>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write the cleaned catalog to this Parquet file
    #[arg(long, value_name = "PATH")]
    pub export_parquet: Option<PathBuf>,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Log level implied by the verbosity flag
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Analysis configuration built from the flags
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let summary_top_n = match self.summary_top_n {
            Some(summary_top_n) if summary_top_n > self.top_n => anyhow::bail!(
                "--summary-top-n ({}) cannot exceed --top-n ({})",
                summary_top_n,
                self.top_n
            ),
            Some(summary_top_n) => summary_top_n,
            None => DEFAULT_SUMMARY_TOP_N.min(self.top_n),
        };

        let compression = CompressionAlgorithm::from_name(&self.compression)?;
        let config = AnalysisConfig::default()
            .with_top_n(self.top_n)
            .with_summary_top_n(summary_top_n)
            .with_compression(compression);
        config.validate()?;
        Ok(config)
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence
pub fn init_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("catalog_insights={}", args.get_log_level()))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Run the analysis described by `args` and print the result
pub fn run(args: &Args) -> Result<PipelineOutput> {
    let config = args.to_config()?;
    let compression = config.compression;

    let output = CatalogPipeline::new(&args.input)?
        .with_config(config)
        .run()
        .with_context(|| format!("Failed to analyse {}", args.input.display()))?;

    if let Some(path) = &args.export_parquet {
        let rows = export_parquet(&output.catalog, path, compression)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        if !args.json {
            println!(
                "{} {} rows to {}\n",
                "Exported".bright_green(),
                rows.to_string().bright_white().bold(),
                path.display()
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.summary)?);
    } else {
        print_report(&output);
    }

    Ok(output)
}

/// Human-readable report of a finished run
pub fn print_report(output: &PipelineOutput) {
    let load = &output.load_report;
    let cleaning = &output.cleaning_report;
    let summary = &output.summary;

    println!("{}", "Dataset".bright_green().bold());
    let (rows, columns) = load.shape();
    println!(
        "  {} {} rows x {} columns",
        "Shape:".bright_cyan(),
        rows.to_string().bright_white(),
        columns.to_string().bright_white()
    );
    if load.rows_rejected() > 0 {
        println!(
            "  {} {}",
            "Malformed rows skipped:".bright_red(),
            load.rows_rejected().to_string().bright_red().bold()
        );
    }
    for column in load.null_counts.iter().filter(|c| c.nulls > 0) {
        println!(
            "  {} {} missing",
            format!("{}:", column.column).bright_cyan(),
            column.nulls
        );
    }

    println!("\n{}", "Cleaning".bright_green().bold());
    println!(
        "  {} {}",
        "Duplicates removed:".bright_cyan(),
        cleaning.duplicates_removed
    );
    println!(
        "  {} {} (filled {})",
        "Rating default:".bright_cyan(),
        cleaning.rating_mode.bright_white(),
        cleaning.ratings_filled
    );
    println!(
        "  {} {}",
        "Rows without a usable date:".bright_cyan(),
        cleaning.rows_without_year()
    );

    println!("\n{}", "Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Total titles:".bright_cyan(),
        summary.total_records.to_string().bright_white().bold()
    );
    println!("  {} {}", "Movies:".bright_cyan(), summary.movies());
    println!("  {} {}", "TV Shows:".bright_cyan(), summary.tv_shows());
    if let (Some(min), Some(max)) = (summary.min_year, summary.max_year) {
        println!("  {} {} to {}", "Years:".bright_cyan(), min, max);
    }
    if let Some(stats) = &summary.movie_durations {
        println!(
            "  {} {}-{} min, mean {:.1}, median {:.1} ({} unreadable)",
            "Movie runtimes:".bright_cyan(),
            stats.min,
            stats.max,
            stats.mean,
            stats.median,
            summary.rejected_durations
        );
    }

    print_histogram(&summary.duration_histogram);

    print_table("Top genres", &summary.top_genres);
    print_table("Top countries", &summary.top_countries);

    let matrix = &summary.year_category;
    if !matrix.is_empty() {
        println!("\n{}", "Titles per year".bright_green().bold());
        println!(
            "  {:>6}  {}",
            "Year".bright_cyan(),
            matrix.categories().join("  ").bright_cyan()
        );
        for year in matrix.years() {
            let row = matrix
                .row(year)
                .iter()
                .map(|count| count.to_string())
                .collect::<Vec<_>>()
                .join("  ");
            println!("  {:>6}  {}", year, row);
        }
    }
}

/// Widest bar drawn for the fullest runtime bucket
const HISTOGRAM_BAR_WIDTH: usize = 40;

fn print_histogram(bins: &[HistogramBin]) {
    let Some(peak) = bins.iter().map(|bin| bin.count).max().filter(|&peak| peak > 0) else {
        return;
    };

    println!("\n{}", "Movie runtime distribution".bright_green().bold());
    for bin in bins {
        let bar = "#".repeat(bin.count * HISTOGRAM_BAR_WIDTH / peak);
        println!(
            "  {:>6.1}-{:<6.1} {:>5}  {}",
            bin.lower,
            bin.upper,
            bin.count,
            bar.bright_blue()
        );
    }
}

fn print_table(title: &str, table: &FrequencyTable) {
    println!("\n{}", title.bright_green().bold());
    if table.is_empty() {
        println!("  {}", "(none)".bright_black());
        return;
    }
    for entry in table.iter() {
        println!(
            "  {:>6}  {}",
            entry.count.to_string().bright_white(),
            entry.key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["catalog-insights"]);

        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT_FILE));
        assert_eq!(args.top_n, 10);
        assert_eq!(args.summary_top_n, None);
        assert!(!args.json);
        assert_eq!(args.get_log_level(), "warn");

        let config = args.to_config().unwrap();
        assert_eq!(config.summary_top_n, 5);
        assert_eq!(config.compression, CompressionAlgorithm::Snappy);
    }

    #[test]
    fn test_flags_to_config() {
        let args = Args::parse_from([
            "catalog-insights",
            "titles.csv",
            "--top-n",
            "3",
            "--summary-top-n",
            "2",
            "--compression",
            "zstd",
            "--verbose",
        ]);

        let config = args.to_config().unwrap();
        assert_eq!(config.genre_top_n, 3);
        assert_eq!(config.country_top_n, 3);
        assert_eq!(config.summary_top_n, 2);
        assert_eq!(config.compression, CompressionAlgorithm::Zstd);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_small_top_n_shrinks_summary() {
        let args = Args::parse_from(["catalog-insights", "--top-n", "3"]);

        let config = args.to_config().unwrap();
        assert_eq!(config.genre_top_n, 3);
        assert_eq!(config.summary_top_n, 3);
    }

    #[test]
    fn test_summary_larger_than_top_n_names_flags() {
        let args = Args::parse_from(["catalog-insights", "--top-n", "2", "--summary-top-n", "4"]);

        let message = args.to_config().unwrap_err().to_string();
        assert!(message.contains("--summary-top-n"));
        assert!(message.contains("--top-n"));
    }

    #[test]
    fn test_bad_flags_rejected() {
        let args = Args::parse_from(["catalog-insights", "--compression", "gzip"]);
        assert!(args.to_config().is_err());

        let args = Args::parse_from(["catalog-insights", "--top-n", "0"]);
        assert!(args.to_config().is_err());
    }
}
