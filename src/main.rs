use catalog_insights::cli::{self, Args};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    cli::init_logging(&args);

    match cli::run(&args) {
        Ok(_output) => {
            // Success - the report has already been printed
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
