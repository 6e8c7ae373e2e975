//! Shape validation for trade submissions

use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::{NewTrade, TradeType};

static TRADE_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII digits only; `\d` in the regex crate is Unicode-aware
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap_or_else(|e| panic!("bad date pattern: {e}"))
});

/// One violated field rule. The display text is what callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TradeFieldError {
    #[error("Invalid stockId")]
    StockId,
    #[error("Invalid quantity")]
    Quantity,
    #[error("Invalid tradeType")]
    TradeType,
    #[error("Invalid tradeDate format")]
    TradeDate,
}

/// A submission whose fields passed every rule.
///
/// `stock_id` is only known to be a non-zero number here; whether it names a
/// catalog entry is decided by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTrade {
    pub stock_id: Number,
    pub quantity: Number,
    pub trade_type: TradeType,
    pub trade_date: String,
    /// The whole submitted object; typed fields are stripped when the trade
    /// is recorded
    pub extra: Map<String, Value>,
}

impl ValidTrade {
    /// The submitted `stockId` as a catalog key.
    ///
    /// `1` and `1.0` name the same stock. Fractional, negative and zero ids
    /// name none.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn catalog_id(&self) -> Option<u64> {
        if let Some(id) = self.stock_id.as_u64() {
            return Some(id);
        }
        self.stock_id
            .as_f64()
            .filter(|v| v.is_finite() && v.fract() == 0.0 && *v >= 1.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    }

    /// Attach the resolved catalog id
    #[must_use]
    pub fn into_new_trade(self, stock_id: u64) -> NewTrade {
        NewTrade {
            stock_id,
            quantity: self.quantity,
            trade_type: self.trade_type,
            trade_date: self.trade_date,
            extra: self.extra,
        }
    }
}

/// Check every rule and collect all violations, in rule order.
pub fn parse_trade(candidate: &Value) -> Result<ValidTrade, Vec<TradeFieldError>> {
    let stock_id = check_stock_id(candidate.get("stockId"));
    let quantity = check_quantity(candidate.get("quantity"));
    let trade_type = check_trade_type(candidate.get("tradeType"));
    let trade_date = check_trade_date(candidate.get("tradeDate"));

    match (stock_id, quantity, trade_type, trade_date) {
        (Ok(stock_id), Ok(quantity), Ok(trade_type), Ok(trade_date)) => Ok(ValidTrade {
            stock_id,
            quantity,
            trade_type,
            trade_date,
            extra: candidate.as_object().cloned().unwrap_or_default(),
        }),
        (stock_id, quantity, trade_type, trade_date) => Err([
            stock_id.err(),
            quantity.err(),
            trade_type.err(),
            trade_date.err(),
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

/// Human-readable messages for every violated rule; empty when valid
pub fn validate(candidate: &Value) -> Vec<String> {
    match parse_trade(candidate) {
        Ok(_) => Vec::new(),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    }
}

fn check_stock_id(value: Option<&Value>) -> Result<Number, TradeFieldError> {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => Ok(n.clone()),
        _ => Err(TradeFieldError::StockId),
    }
}

fn check_quantity(value: Option<&Value>) -> Result<Number, TradeFieldError> {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v > 0.0) => Ok(n.clone()),
        _ => Err(TradeFieldError::Quantity),
    }
}

fn check_trade_type(value: Option<&Value>) -> Result<TradeType, TradeFieldError> {
    value
        .and_then(Value::as_str)
        .and_then(TradeType::parse)
        .ok_or(TradeFieldError::TradeType)
}

fn check_trade_date(value: Option<&Value>) -> Result<String, TradeFieldError> {
    match value.and_then(Value::as_str) {
        Some(date) if TRADE_DATE_PATTERN.is_match(date) => Ok(date.to_string()),
        _ => Err(TradeFieldError::TradeDate),
    }
}
