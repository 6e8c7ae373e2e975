//! Trade submission handler

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::Json,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    error::ApiError,
    models::TradeResponse,
    server::AppState,
    validation::parse_trade,
};

/// `POST /trades/new`
///
/// Field validation runs first; the stock id is resolved against the catalog
/// only for submissions that pass it.
pub async fn create_trade(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<TradeResponse>), ApiError> {
    let candidate = if is_json_content(&headers) {
        parse_body(&body)?
    } else {
        Value::Object(Map::new())
    };

    let valid = parse_trade(&candidate)
        .map_err(|errors| ApiError::Validation(errors.iter().map(ToString::to_string).collect()))?;

    let stock_id = valid
        .catalog_id()
        .and_then(|id| state.catalog.find_by_id(id))
        .map(|stock| stock.stock_id)
        .ok_or(ApiError::StockNotFound)?;

    let trade = state.ledger.append(valid.into_new_trade(stock_id));
    info!(
        "Trade {} submitted: {:?} {} of stock {}",
        trade.trade_id, trade.trade_type, trade.quantity, trade.stock_id
    );

    Ok((StatusCode::CREATED, Json(TradeResponse { trade })))
}

/// Only `application/json` bodies are read; anything else is submitted as `{}`
fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// An absent body counts as an empty object
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}
