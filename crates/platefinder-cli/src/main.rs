use std::sync::Arc;

use clap::Parser;

use platefinder_core::Coordinate;
use platefinder_places::{FixedLocation, NearbyQuery, PlacesClient, QueryOptions};

mod render;

#[derive(Debug, Parser)]
#[command(name = "platefinder")]
#[command(about = "Find, rank, and enrich restaurants near a coordinate")]
struct Cli {
    /// Latitude of the search origin.
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude of the search origin.
    #[arg(long, allow_negative_numbers = true)]
    lng: f64,

    /// Search radius in meters (overrides PLATEFINDER_SEARCH_RADIUS_M).
    #[arg(long)]
    radius_m: Option<u32>,

    /// Maximum number of results (overrides PLATEFINDER_MAX_RESULTS).
    #[arg(long)]
    max_results: Option<usize>,

    /// Emit the result list as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = platefinder_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let client = PlacesClient::new(&config.places_api_key, config.request_timeout_secs)?
        .photo_max_width(config.photo_max_width);

    let mut options = QueryOptions::from_config(&config);
    if let Some(radius_m) = cli.radius_m {
        options.radius_m = radius_m;
    }
    if let Some(max_results) = cli.max_results {
        options.max_results = max_results;
    }

    let origin = Coordinate::new(cli.lat, cli.lng);
    let query = NearbyQuery::new(FixedLocation(origin), Arc::new(client), options);

    let snapshot = query.refetch().await;
    render::print_snapshot(&snapshot, cli.json)
}
