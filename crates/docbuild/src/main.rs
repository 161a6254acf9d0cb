//! Docbuild CLI - documentation build pipeline.
//!
//! Copies the static content tree into the output directory, runs the
//! external reference generator over the library headers, and escapes
//! C++ code fences in the generated markdown.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::BuildArgs;
use output::Output;

/// Docbuild - documentation build pipeline.
#[derive(Parser)]
#[command(name = "docbuild", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.build.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = cli.build.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
