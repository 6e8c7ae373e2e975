//! Stock API server implementation

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, get_service, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    config::ApiConfig,
    handlers::{create_trade, get_stock, list_stocks},
    middleware::{create_cors_layer, handle_panic, logging_middleware},
    store::{Catalog, Ledger},
};

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<Ledger>,
}

impl AppState {
    pub fn new(catalog: Catalog, ledger: Ledger) -> Self {
        Self {
            catalog: Arc::new(catalog),
            ledger: Arc::new(ledger),
        }
    }

    /// State holding the stocks and trades the service ships with
    pub fn seeded() -> Self {
        Self::new(Catalog::seeded(), Ledger::seeded())
    }
}

/// Stock API server
pub struct StockApiServer {
    config: ApiConfig,
    state: AppState,
}

impl StockApiServer {
    /// Create a server over the seeded catalog and ledger
    pub fn new(config: ApiConfig) -> Self {
        Self::with_state(config, AppState::seeded())
    }

    pub fn with_state(config: ApiConfig, state: AppState) -> Self {
        info!(
            stocks = state.catalog.len(),
            trades = state.ledger.len(),
            "Stock API server initialized"
        );
        Self { config, state }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = match self.config.server_address().parse() {
            Ok(addr) => addr,
            Err(e) => {
                error!(
                    "Invalid server address '{}': {}",
                    self.config.server_address(),
                    e
                );
                return Err(anyhow::anyhow!("Invalid server address: {}", e));
            }
        };

        let app = create_router(&self.config, self.state);

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind TCP listener to {}: {}", addr, e);
                return Err(anyhow::anyhow!("Failed to bind to address {}: {}", addr, e));
            }
        };

        info!("Stock API listening at http://{}", listener.local_addr()?);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        Ok(())
    }
}

/// Build the Axum application with all routes and middleware
pub fn create_router(config: &ApiConfig, state: AppState) -> Router {
    let landing_page = ServeFile::new(&config.assets.landing_page);
    let static_files = ServeDir::new(&config.assets.static_dir);

    let routes = Router::new()
        .route("/", get_service(landing_page))
        .route("/stocks", get(list_stocks))
        .route("/stocks/:ticker", get(get_stock))
        .route("/trades/new", post(create_trade))
        .fallback_service(static_files)
        .with_state(state);

    apply_middleware(routes, config)
}

/// Layer stack shared by every route; CORS sits outermost
pub fn apply_middleware(router: Router, config: &ApiConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(config))
}

/// API route documentation
pub fn print_routes() {
    println!("Stock API Routes:");
    println!("=================");
    println!();
    println!("  GET  /                - Landing page");
    println!("  GET  /stocks          - List all stocks");
    println!("  GET  /stocks/:ticker  - Get a stock by ticker");
    println!("  POST /trades/new      - Record a new trade");
    println!();
    println!("Any other GET path is served from the static directory.");
    println!("All endpoints allow cross-origin requests.");
}
