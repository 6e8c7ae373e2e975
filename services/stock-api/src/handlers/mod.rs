//! API handlers for the catalog and ledger endpoints

pub mod stocks;
pub mod trades;

pub use stocks::{get_stock, list_stocks};
pub use trades::create_trade;
