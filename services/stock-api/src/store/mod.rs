//! In-memory stores backing the API

pub mod catalog;
pub mod ledger;

pub use catalog::Catalog;
pub use ledger::Ledger;
