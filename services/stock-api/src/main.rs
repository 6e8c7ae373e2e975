//! Stock Trading API - Main Entry Point

use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_api::{ApiConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = Command::new("stock-api")
        .version(env!("CARGO_PKG_VERSION"))
        .about("In-memory stock catalog and trade ledger over HTTP")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("stock-api.toml"),
        )
        .arg(
            Arg::new("routes")
                .long("routes")
                .help("Print available routes and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("routes") {
        stock_api::server::print_routes();
        return Ok(());
    }

    let config_path = matches
        .get_one::<String>("config")
        .map_or("stock-api.toml", String::as_str);
    let config = match ApiConfig::from_file(config_path) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_path);
            config
        }
        Err(e) => {
            warn!("No usable config at {}: {}", config_path, e);
            info!("Using default configuration");
            ApiConfig::default()
        }
    };

    info!("Starting Stock API v{}", env!("CARGO_PKG_VERSION"));
    info!("Static root: {}", config.assets.static_dir.display());
    info!("Landing page: {}", config.assets.landing_page.display());
    info!("CORS: {}", config.cors.enabled);

    if let Err(e) = start_server(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
