//! Wayfinder CLI
//!
//! Place search, routing and external maps handoff from the terminal.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::ApplicationError;
use application::ports::{MapViewPort, UrlOpenerPort};
use application::services::{
    MapsPlatform, RouteOrchestrator, SearchController, UserNotice, directions_link,
    format_route_summary,
};
use clap::{Parser, Subcommand};
use domain::{GeoPoint, PlaceCandidate, TravelProfile};
use infrastructure::{
    AppConfig, CommandUrlOpener, ConfiguredLocationProvider, HeadlessMapView, LogFormat,
    NominatimGeocodingAdapter, OsrmRoutingAdapter,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Wayfinder CLI
#[derive(Parser)]
#[command(name = "wayfinder-cli")]
#[command(author, version, about = "Wayfinder directions CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "WAYFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format, overrides the configuration
    #[arg(long)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search places matching a query
    ///
    /// Example: wayfinder-cli search "MG Road"
    Search {
        /// Place name or address
        query: String,
    },

    /// Find a route between two places and fit the map to it
    ///
    /// Each side is a place name or a "lat,lon" coordinate.
    /// Example: wayfinder-cli route --from Bangalore --to Mysuru --profile driving
    Route {
        /// Origin place or "lat,lon"
        #[arg(long, allow_hyphen_values = true, required_unless_present = "from_here")]
        from: Option<String>,

        /// Destination place or "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        to: String,

        /// Travel profile (driving, walking, cycling)
        #[arg(long, value_parser = parse_profile)]
        profile: Option<TravelProfile>,

        /// Use the configured current location as origin
        #[arg(long, conflicts_with = "from")]
        from_here: bool,

        /// Open the trip in an external maps application
        #[arg(long)]
        open: bool,

        /// Maps application for the handoff (apple, google)
        #[arg(long, value_parser = parse_platform)]
        platform: Option<MapsPlatform>,
    },

    /// Print a directions link for two coordinates without any lookup
    ///
    /// Example: wayfinder-cli link --from 12.9716,77.5946 --to 12.2958,76.6394
    Link {
        /// Origin as "lat,lon"
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        from: GeoPoint,

        /// Destination as "lat,lon"
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        to: GeoPoint,

        /// Maps application (apple, google)
        #[arg(long, value_parser = parse_platform)]
        platform: Option<MapsPlatform>,

        /// Open the link instead of only printing it
        #[arg(long)]
        open: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse a "lat,lon" pair
fn parse_coordinate(s: &str) -> Result<GeoPoint, String> {
    s.parse().map_err(|e: domain::DomainError| e.to_string())
}

fn parse_profile(s: &str) -> Result<TravelProfile, String> {
    s.parse().map_err(|e: domain::DomainError| e.to_string())
}

fn parse_platform(s: &str) -> Result<MapsPlatform, String> {
    s.parse().map_err(|e: domain::DomainError| e.to_string())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

fn init_logging(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr, results to stdout
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Turn an orchestrator failure into the alert text shown to the user
fn notice_error(notice: &UserNotice) -> anyhow::Error {
    anyhow::anyhow!("{notice}")
}

/// Surface a route failure as its user notice; cancellations carry none
fn route_failure(orchestrator: &RouteOrchestrator, error: ApplicationError) -> anyhow::Error {
    orchestrator
        .notice_for(&error)
        .map_or_else(|| error.into(), |notice| notice_error(&notice))
}

fn print_suggestions(suggestions: &[PlaceCandidate]) {
    if suggestions.is_empty() {
        println!("No places found.");
        return;
    }
    for (index, candidate) in suggestions.iter().enumerate() {
        println!(
            "{:>2}. {}  ({:.5}, {:.5})",
            index + 1,
            candidate.label,
            candidate.latitude,
            candidate.longitude
        );
    }
}

async fn run_search(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let geocoder = NominatimGeocodingAdapter::with_config(&config.geocoding)?;
    let controller = SearchController::new(Arc::new(geocoder), config.search.clone());

    if query.trim().chars().count() < config.search.min_query_len {
        println!(
            "Type at least {} characters to search.",
            config.search.min_query_len
        );
        return Ok(());
    }

    controller.on_text_changed(query);
    controller.settle().await;

    let state = controller.snapshot();
    println!("🔎 {}", state.query.trim());
    print_suggestions(&state.suggestions);
    println!("\n{}", config.attribution);
    Ok(())
}

/// Feed one side of the trip: a coordinate becomes a pick, anything else text
fn set_endpoint(orchestrator: &RouteOrchestrator, input: &str, origin: bool) {
    match parse_coordinate(input) {
        Ok(point) => {
            let candidate =
                PlaceCandidate::new(input.trim(), point.latitude(), point.longitude());
            if origin {
                orchestrator.pick_origin(&candidate);
            } else {
                orchestrator.pick_destination(&candidate);
            }
        },
        Err(_) if origin => orchestrator.set_from_text(input),
        Err(_) => orchestrator.set_to_text(input),
    }
}

#[allow(clippy::fn_params_excessive_bools)]
async fn run_route(
    config: &AppConfig,
    from: Option<&str>,
    to: &str,
    profile: Option<TravelProfile>,
    from_here: bool,
    open: bool,
    platform: Option<MapsPlatform>,
) -> anyhow::Result<()> {
    let map_view = Arc::new(HeadlessMapView::from_config(&config.map));
    let orchestrator = RouteOrchestrator::new(
        Arc::new(NominatimGeocodingAdapter::with_config(&config.geocoding)?),
        Arc::new(OsrmRoutingAdapter::with_config(&config.routing)?),
        Arc::clone(&map_view) as Arc<dyn MapViewPort>,
    )
    .with_location(Arc::new(ConfiguredLocationProvider::from_config(
        &config.location,
    )?))
    .with_url_opener(Arc::new(CommandUrlOpener::native()))
    .with_fit_options(config.map.fit_options())
    .with_profile(profile.unwrap_or(config.routing.default_profile));

    if from_here {
        if let Err(e) = orchestrator.use_current_location().await {
            return Err(route_failure(&orchestrator, e));
        }
    } else if let Some(from) = from {
        set_endpoint(&orchestrator, from, true);
    }
    set_endpoint(&orchestrator, to, false);

    let route = match orchestrator.find_route().await {
        Ok(route) => route,
        Err(e) => {
            debug!(error = ?e, "Route search failed");
            return Err(route_failure(&orchestrator, e));
        },
    };

    let trip = orchestrator.snapshot();
    let region = map_view.region();
    println!("🚗 {} → {}", trip.from_text, trip.to_text);
    println!("{}", format_route_summary(&route));
    println!("Profile: {}", orchestrator.profile());
    println!("Path: {} points", route.path.len());
    println!(
        "Viewport: center {} span {:.4}° × {:.4}°",
        region.center, region.latitude_delta, region.longitude_delta
    );

    let platform = platform.unwrap_or_else(MapsPlatform::native);
    if open {
        match orchestrator.open_in_maps(platform) {
            Ok(link) => println!("🗺️  Opened {link}"),
            Err(ApplicationError::MissingEndpoint) => {
                return Err(notice_error(&UserNotice::nothing_to_open()));
            },
            Err(e) => return Err(e.into()),
        }
    } else {
        println!("🗺️  {}", orchestrator.directions_link(platform)?);
    }

    println!("\n{}", config.attribution);
    Ok(())
}

fn run_link(
    from: GeoPoint,
    to: GeoPoint,
    platform: Option<MapsPlatform>,
    open: bool,
) -> anyhow::Result<()> {
    let link = directions_link(from, to, platform.unwrap_or_else(MapsPlatform::native));
    if open {
        CommandUrlOpener::native().open_url(&link)?;
    }
    println!("{link}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // Set up logging based on verbosity
    init_logging(cli.verbose, cli.log_format.unwrap_or(config.log_format));

    match cli.command {
        Commands::Search { query } => run_search(&config, &query).await,
        Commands::Route {
            from,
            to,
            profile,
            from_here,
            open,
            platform,
        } => {
            run_route(
                &config,
                from.as_deref(),
                &to,
                profile,
                from_here,
                open,
                platform,
            )
            .await
        },
        Commands::Link {
            from,
            to,
            platform,
            open,
        } => run_link(from, to, platform, open),
    }
}
