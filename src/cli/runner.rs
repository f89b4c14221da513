//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, SearchArgs};
use crate::cli::output::render;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::pagination::{CancelHandle, PaginationConfig, Paginator, SearchResult};
use crate::search::{Location, SearchRequest};
use std::time::Duration;
use tracing::{debug, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search(args) => self.search(args).await,
            Commands::ShowConfig => self.show_config(),
        }
    }

    fn load_settings(&self) -> Result<Settings> {
        match &self.cli.config {
            Some(path) => {
                debug!("Loading settings from {}", path.display());
                Settings::from_file(path)
            }
            None => Ok(Settings::default()),
        }
    }

    fn show_config(&self) -> Result<()> {
        let settings = self.load_settings()?;
        println!("{settings:#?}");
        Ok(())
    }

    async fn search(&self, args: &SearchArgs) -> Result<()> {
        let settings = self.load_settings()?;
        let api_key = settings.resolve_api_key(self.cli.api_key.as_deref())?;
        let client = settings.places_client(api_key, self.cli.verbose)?;
        let request = build_request(args)?;
        let paginator = Paginator::new(pagination_config(&settings, args)?);

        let cancel = CancelHandle::new();
        let signal = cancel.signal();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, returning partial results");
                cancel.cancel();
            }
        });

        let result = paginator
            .fetch_all_with_cancel(&request, &client, &signal)
            .await;
        interrupt.abort();

        report(&result);
        if result.is_empty() {
            return Err(Error::Other("No places found".to_string()));
        }

        println!("{}", render(&result.records, self.cli.format)?);
        Ok(())
    }
}

/// Build the search request from CLI arguments
fn build_request(args: &SearchArgs) -> Result<SearchRequest> {
    let location = Location::new(args.lat, args.lng);
    let request = match (args.radius, args.rank_by_distance) {
        (Some(radius), false) => SearchRequest::within_radius(location, radius),
        (None, true) => SearchRequest::by_distance(location),
        _ => return Err(Error::config("Specify either a radius or --rank-by-distance")),
    };

    let request = match &args.types {
        Some(types) => request.with_types_csv(types),
        None => request,
    };

    Ok(match &args.keyword {
        Some(keyword) => request.with_keyword(keyword.as_str()),
        None => request,
    })
}

/// Apply CLI overrides on top of the settings file
fn pagination_config(settings: &Settings, args: &SearchArgs) -> Result<PaginationConfig> {
    let mut config = PaginationConfig::from(&settings.pagination);

    if let Some(cap) = args.cap {
        if cap == 0 {
            return Err(Error::invalid_value("cap", "must be greater than zero"));
        }
        config = config.with_cap(cap);
    }
    if let Some(delay) = args.page_delay_ms {
        config = config.with_page_delay(Duration::from_millis(delay));
    }
    if let Some(retries) = args.max_retries {
        config = config.with_max_retries(retries);
    }

    Ok(config)
}

/// Session summary on stderr, keeping stdout for records
fn report(result: &SearchResult) {
    eprintln!(
        "{} places from {} pages ({} requests), {}",
        result.total(),
        result.pages,
        result.requests,
        result.reason
    );
    if let Some(error) = &result.error {
        eprintln!("Stopped early: {error}");
    }
}
