//! Inventory domain module: per-product FIFO batch ledgers.
//!
//! This crate contains business rules for stock intake, FIFO depletion and
//! expiry detection, implemented purely as deterministic domain logic (no IO,
//! no locking, no storage).

pub mod batch;
pub mod ledger;
pub mod product;

pub use batch::{Allocation, Batch, BatchSnapshot, ExpiredBatch};
pub use ledger::BatchLedger;
pub use product::{Product, ProductAttributes, SaleReceipt, StockSnapshot};
