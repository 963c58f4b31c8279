use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockledger_core::{DomainResult, ProductName, ValueObject};
use stockledger_inventory::StockSnapshot;

use super::InventoryReports;

/// Audit line: current stock against lifetime units sold.
///
/// Same numbers as the stock snapshot today; kept separate so reconciliation
/// against a physical count can be added here without touching live tracking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub stock_level: u64,
    pub sold: u64,
}

impl ValueObject for AuditEntry {}

impl InventoryReports {
    /// Stock level and sales of one product.
    pub fn stock_snapshot(&self, name: &str) -> DomainResult<StockSnapshot> {
        self.registry.stock_snapshot(name)
    }

    /// Stock level and sales of every product.
    pub fn stock_levels(&self) -> BTreeMap<ProductName, StockSnapshot> {
        self.registry.collect(|p| Some(p.stock_snapshot()))
    }

    pub fn audit(&self) -> BTreeMap<ProductName, AuditEntry> {
        self.registry.collect(|p| {
            Some(AuditEntry {
                stock_level: p.stock_level(),
                sold: p.sales_total(),
            })
        })
    }
}
