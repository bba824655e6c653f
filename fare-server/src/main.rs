use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use fare_server::builder::{self, BuilderConfig};
use fare_server::dataset::Dataset;
use fare_server::lookup::{LookupConfig, LookupEngine};
use fare_server::source::{SourceClient, SourceClientConfig};
use fare_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default directory holding `stations.json` and `fares.json`.
const DEFAULT_DATA_DIR: &str = "data";

/// Default listen address for `serve`.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

const USAGE: &str = "usage: fare-server <build|serve> [data_dir]";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let command = args.next();
    let data_dir = args
        .next()
        .or_else(|| std::env::var("FARES_DATA_DIR").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let result = match command.as_deref() {
        Some("build") => run_build(data_dir).await,
        Some("serve") => run_serve(data_dir).await,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Fetch both exports, normalize them and write the artifacts.
async fn run_build(out_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut source_config = SourceClientConfig::default();
    if let Ok(url) = std::env::var("FARES_STATIONS_URL") {
        source_config.stations_url = url;
    }
    if let Ok(url) = std::env::var("FARES_FARES_URL") {
        source_config.fares_url = url;
    }

    let mut builder_config = BuilderConfig::default();
    if let Ok(column) = std::env::var("FARES_FARE_COLUMN") {
        builder_config = builder_config.with_fare_column(column);
    }

    let client = SourceClient::new(source_config)?;
    let (dataset, report) = builder::build(&client, &builder_config).await?;
    dataset.write_to(&out_dir)?;

    info!(
        stations = report.station_count,
        fare_entries = report.fares.entries,
        dir = %out_dir.display(),
        "build complete"
    );
    Ok(())
}

/// Load the artifacts and serve lookup queries over HTTP.
async fn run_serve(data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = Dataset::read_from(&data_dir)?;
    let engine = LookupEngine::from_dataset(dataset, LookupConfig::default());

    let addr: SocketAddr = std::env::var("FARES_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let static_dir = std::env::var("FARES_STATIC_DIR").ok();

    let app = create_router(AppState::new(engine), static_dir.as_deref());

    info!("fare finder listening on http://{addr}");
    info!("  GET /health");
    info!("  GET /api/stations/search?q=…");
    info!("  GET /api/stations/:id");
    info!("  GET /api/fare?from=…&to=…");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
