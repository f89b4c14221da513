// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! nearby-pager CLI
//!
//! Runs a paginated nearby search and prints every record

use clap::Parser;
use nearby_pager::cli::{Cli, Runner};
use nearby_pager::Settings;
use tracing::Level;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout carries records
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(&cli).into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `--verbose` wins, then the settings file, then info
fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        return Level::DEBUG;
    }
    cli.config
        .as_ref()
        .and_then(|path| Settings::from_file(path).ok())
        .map_or(Level::INFO, |settings| settings.log_level.into())
}
