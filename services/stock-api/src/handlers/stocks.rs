//! Catalog read handlers

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{debug, info};

use crate::{
    error::ApiError,
    models::{StockListResponse, StockResponse},
    server::AppState,
};

/// `GET /stocks`
pub async fn list_stocks(State(state): State<AppState>) -> Json<StockListResponse> {
    let stocks = state.catalog.list().to_vec();
    debug!(count = stocks.len(), "Listing stocks");
    Json(StockListResponse { stocks })
}

/// `GET /stocks/:ticker`
pub async fn get_stock(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<StockResponse>, ApiError> {
    info!("Stock lookup for ticker: {}", ticker);

    let stock = state
        .catalog
        .find_by_ticker(&ticker)
        .cloned()
        .ok_or(ApiError::StockNotFound)?;

    Ok(Json(StockResponse { stock }))
}
