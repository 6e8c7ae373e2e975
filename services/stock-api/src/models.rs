//! REST API models and request/response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Wire names of the fields a trade always carries
pub const TRADE_FIELDS: [&str; 5] = ["tradeId", "stockId", "quantity", "tradeType", "tradeDate"];

/// A tradable stock in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Stable catalog identifier
    pub stock_id: u64,
    /// Exchange ticker, e.g. "AAPL"
    pub ticker: String,
    /// Display name
    pub company_name: String,
    /// Last known price, informational only
    pub price: f64,
}

impl Stock {
    pub fn new(stock_id: u64, ticker: &str, company_name: &str, price: f64) -> Self {
        Self {
            stock_id,
            ticker: ticker.to_string(),
            company_name: company_name.to_string(),
            price,
        }
    }
}

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    /// Parse the wire form. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }
}

/// Trade fields supplied by a caller, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub stock_id: u64,
    /// Kept as submitted so `15` round-trips as `15`, not `15.0`
    pub quantity: Number,
    pub trade_type: TradeType,
    pub trade_date: String,
    /// Any other caller-supplied fields, stored and echoed unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A trade recorded in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub trade_id: u64,
    pub stock_id: u64,
    pub quantity: Number,
    pub trade_type: TradeType,
    pub trade_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trade {
    /// Extra fields never shadow the typed ones; a caller-sent `tradeId` is
    /// discarded in favour of `trade_id`.
    pub fn from_new(trade_id: u64, fields: NewTrade) -> Self {
        let mut extra = fields.extra;
        for name in TRADE_FIELDS {
            extra.remove(name);
        }
        Self {
            trade_id,
            stock_id: fields.stock_id,
            quantity: fields.quantity,
            trade_type: fields.trade_type,
            trade_date: fields.trade_date,
            extra,
        }
    }
}

/// `GET /stocks` body
#[derive(Debug, Serialize, Deserialize)]
pub struct StockListResponse {
    pub stocks: Vec<Stock>,
}

/// `GET /stocks/:ticker` body
#[derive(Debug, Serialize, Deserialize)]
pub struct StockResponse {
    pub stock: Stock,
}

/// `POST /trades/new` body
#[derive(Debug, Serialize, Deserialize)]
pub struct TradeResponse {
    pub trade: Trade,
}

/// Single-message error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Validation error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}
