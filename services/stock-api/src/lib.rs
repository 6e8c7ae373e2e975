//! Stock Trading API
//!
//! Small REST service over an in-memory stock catalog and trade ledger.
//! Features:
//! - Catalog listing and ticker lookup
//! - Trade submission with field validation
//! - Static landing page and asset serving
//! - Permissive CORS and structured request logging

#![allow(missing_docs)]

use anyhow::Result;

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod store;
pub mod validation;

pub use config::{ApiConfig, AssetConfig, CorsConfig, ServerConfig};
pub use error::ApiError;
pub use server::{AppState, StockApiServer, apply_middleware, create_router};

/// Start the stock API server
pub async fn start_server(config: ApiConfig) -> Result<()> {
    StockApiServer::new(config).start().await
}
