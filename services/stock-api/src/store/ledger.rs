//! Append-only trade ledger

use parking_lot::RwLock;
use serde_json::Map;
use tracing::info;

use crate::models::{NewTrade, Trade, TradeType};

#[derive(Debug)]
struct LedgerInner {
    trades: Vec<Trade>,
    next_trade_id: u64,
}

/// Trades in insertion order with a monotonic id counter.
///
/// Id assignment and the push share one write lock, so concurrent appends
/// never hand out the same `trade_id`.
#[derive(Debug)]
pub struct Ledger {
    inner: RwLock<LedgerInner>,
}

impl Ledger {
    /// Empty ledger; the first trade gets id 1
    #[must_use]
    pub fn new() -> Self {
        Self::from_trades(Vec::new())
    }

    /// Ledger pre-populated with existing trades. The counter resumes after
    /// the highest id present.
    #[must_use]
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        let next_trade_id = trades.iter().map(|t| t.trade_id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(LedgerInner {
                trades,
                next_trade_id,
            }),
        }
    }

    /// Ledger with the three historical trades the service ships with
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_trades(vec![
            seed_trade(1, 1, 10, TradeType::Buy, "2024-08-07"),
            seed_trade(2, 2, 5, TradeType::Sell, "2024-08-06"),
            seed_trade(3, 3, 7, TradeType::Buy, "2024-08-05"),
        ])
    }

    /// Snapshot of all trades in insertion order
    pub fn list(&self) -> Vec<Trade> {
        self.inner.read().trades.clone()
    }

    /// Assign the next id, store the trade and return the stored record
    pub fn append(&self, fields: NewTrade) -> Trade {
        let mut inner = self.inner.write();
        let trade = Trade::from_new(inner.next_trade_id, fields);
        inner.next_trade_id += 1;
        inner.trades.push(trade.clone());
        info!(
            trade_id = trade.trade_id,
            stock_id = trade.stock_id,
            "Trade recorded"
        );
        trade
    }

    pub fn len(&self) -> usize {
        self.inner.read().trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().trades.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_trade(
    trade_id: u64,
    stock_id: u64,
    quantity: u64,
    trade_type: TradeType,
    trade_date: &str,
) -> Trade {
    Trade {
        trade_id,
        stock_id,
        quantity: quantity.into(),
        trade_type,
        trade_date: trade_date.to_string(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn buy(stock_id: u64) -> NewTrade {
        NewTrade {
            stock_id,
            quantity: serde_json::Number::from(15u64),
            trade_type: TradeType::Buy,
            trade_date: "2024-08-08".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_sequential_ids_from_empty() {
        let ledger = Ledger::new();
        let ids: Vec<_> = (0..5).map(|_| ledger.append(buy(1)).trade_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn test_seeded_continues_after_last_id() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.len(), 3);
        let trade = ledger.append(buy(2));
        assert_eq!(trade.trade_id, 4);
        assert_eq!(ledger.list().last(), Some(&trade));
    }

    #[test]
    fn test_counter_follows_max_id_not_length() {
        let ledger = Ledger::from_trades(vec![seed_trade(10, 1, 1, TradeType::Sell, "2024-01-01")]);
        assert_eq!(ledger.append(buy(1)).trade_id, 11);
    }

    #[test]
    fn test_append_preserves_fields() {
        let ledger = Ledger::new();
        let trade = ledger.append(buy(3));
        assert_eq!(trade.stock_id, 3);
        assert_eq!(trade.trade_type, TradeType::Buy);
        assert_eq!(trade.trade_date, "2024-08-08");
        assert_eq!(trade.quantity, serde_json::Number::from(15));
    }

    #[test]
    fn test_concurrent_appends_get_unique_ids() {
        let ledger = Arc::new(Ledger::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    (0..50).map(|_| ledger.append(buy(1)).trade_id).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=400).collect::<Vec<_>>());
    }
}
