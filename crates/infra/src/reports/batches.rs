use std::collections::BTreeMap;

use chrono::NaiveDate;

use stockledger_core::{DomainResult, ProductName};
use stockledger_inventory::{Batch, BatchSnapshot, ExpiredBatch};

use super::InventoryReports;

impl InventoryReports {
    /// FIFO batch listing of one product.
    pub fn batches(&self, name: &str) -> DomainResult<Vec<BatchSnapshot>> {
        self.registry.batches(name)
    }

    /// FIFO batch listing of every product.
    pub fn all_batches(&self) -> BTreeMap<ProductName, Vec<BatchSnapshot>> {
        self.registry.collect(|p| Some(p.batches()))
    }

    /// Batches past their expiry as of `as_of`, for products that have any.
    /// Advisory only: nothing is written off.
    pub fn expired(&self, as_of: NaiveDate) -> BTreeMap<ProductName, Vec<ExpiredBatch>> {
        self.registry.collect(|p| {
            let expired: Vec<_> = p.scan_expired(as_of).map(Batch::expired_entry).collect();
            (!expired.is_empty()).then_some(expired)
        })
    }
}
