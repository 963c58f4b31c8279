//! Read-only reporting projections over the product registry.
//!
//! Nothing here mutates stock. Registry-wide reports are keyed by product name
//! in sorted order; each product is read under its own lock, so a report may
//! mix snapshots taken a few microseconds apart.

use std::sync::Arc;

use crate::config::InventoryConfig;
use crate::registry::ProductRegistry;

pub mod batches;
pub mod replenishment;
pub mod stock;

pub use replenishment::ReplenishmentSuggestion;
pub use stock::AuditEntry;

/// Entry point for every report; holds the registry and default policy.
#[derive(Debug, Clone)]
pub struct InventoryReports {
    registry: Arc<ProductRegistry>,
    config: InventoryConfig,
}

impl InventoryReports {
    pub fn new(registry: Arc<ProductRegistry>, config: InventoryConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }
}
