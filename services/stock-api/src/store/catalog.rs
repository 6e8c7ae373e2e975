//! Read-only stock catalog

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::models::Stock;

/// Fixed set of tradable stocks, kept in insertion order
#[derive(Debug, Clone)]
pub struct Catalog {
    stocks: Vec<Stock>,
    by_ticker: FxHashMap<String, usize>,
    by_id: FxHashMap<u64, usize>,
}

impl Catalog {
    /// Build a catalog from an ordered list of stocks.
    ///
    /// When a ticker or id repeats, lookups resolve to the first entry, while
    /// `list` still returns every entry.
    #[must_use]
    pub fn from_stocks(stocks: Vec<Stock>) -> Self {
        let mut by_ticker = FxHashMap::default();
        let mut by_id = FxHashMap::default();
        for (idx, stock) in stocks.iter().enumerate() {
            by_ticker.entry(stock.ticker.clone()).or_insert(idx);
            by_id.entry(stock.stock_id).or_insert(idx);
        }
        debug!(count = stocks.len(), "Catalog built");
        Self {
            stocks,
            by_ticker,
            by_id,
        }
    }

    /// Catalog with the three stocks the service ships with
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_stocks(vec![
            Stock::new(1, "AAPL", "Apple Inc.", 150.75),
            Stock::new(2, "GOOGL", "Alphabet Inc.", 2750.1),
            Stock::new(3, "TSLA", "Tesla, Inc.", 695.5),
        ])
    }

    pub fn list(&self) -> &[Stock] {
        &self.stocks
    }

    /// Exact, case-sensitive ticker lookup
    pub fn find_by_ticker(&self, ticker: &str) -> Option<&Stock> {
        self.by_ticker.get(ticker).map(|&idx| &self.stocks[idx])
    }

    pub fn find_by_id(&self, stock_id: u64) -> Option<&Stock> {
        self.by_id.get(&stock_id).map(|&idx| &self.stocks[idx])
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
