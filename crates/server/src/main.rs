use anyhow::Context;
use clap::Parser;
use hexnear::{Config, IndexBuilder, ProximityResolver};
use hexnear_server::{
    AppState, DEFAULT_GEOIP_TIMEOUT, DEFAULT_GEOIP_URL, IpApiLocator, run_server,
};
use hexnear_types::Coordinate;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// POI/config file (.json, .toml or .geojson); the built-in sample set otherwise
    #[arg(short, long)]
    config: Option<String>,

    /// H3 resolution (0-15)
    #[arg(short, long)]
    resolution: Option<u8>,

    /// Rings of neighbouring cells searched around the caller
    #[arg(long)]
    rings: Option<u32>,

    #[arg(long, default_value = DEFAULT_GEOIP_URL)]
    geoip_url: String,

    #[arg(long, default_value_t = DEFAULT_GEOIP_TIMEOUT.as_millis() as u64)]
    geoip_timeout_ms: u64,

    /// Location used for loopback callers
    #[arg(long, requires = "fallback_lon", allow_hyphen_values = true)]
    fallback_lat: Option<f64>,

    #[arg(long, requires = "fallback_lat", allow_hyphen_values = true)]
    fallback_lon: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexnear_server=info,hexnear=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading POIs from {}", path);
            Config::from_path(path).with_context(|| format!("failed to load {}", path))?
        }
        None => {
            info!("No config given, using built-in sample POIs");
            Config::default()
        }
    };
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(rings) = args.rings {
        config.ring_count = rings;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let index = IndexBuilder::from_config(&config).build()?;
    for skipped in index.skipped() {
        warn!(
            "Skipped POI {} ({}): {}",
            skipped.poi.id(),
            skipped.poi.name(),
            skipped.reason
        );
    }
    let stats = index.stats();
    info!(
        "Indexed {} POIs into {} cells at resolution {} ({} skipped)",
        stats.poi_count, stats.cell_count, stats.resolution, stats.skipped_count
    );

    let resolver = ProximityResolver::new(Arc::new(index)).with_ring_count(config.ring_count)?;
    let locator = IpApiLocator::new(
        &args.geoip_url,
        Duration::from_millis(args.geoip_timeout_ms),
    )?;

    let mut state = AppState::new(resolver, locator);
    if let (Some(lat), Some(lon)) = (args.fallback_lat, args.fallback_lon) {
        let fallback = Coordinate::new(lat, lon);
        hexnear::validation::validate_coordinate(&fallback)?;
        state = state.with_fallback(fallback);
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_server(listener, state, shutdown).await?;

    Ok(())
}
