use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockledger_core::{ProductName, ValueObject};

use super::InventoryReports;

/// Suggested reorder for one low product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplenishmentSuggestion {
    pub product: ProductName,
    pub needed_quantity: u64,
}

impl ValueObject for ReplenishmentSuggestion {}

impl InventoryReports {
    /// Products whose stock level is strictly below `threshold` (configured
    /// threshold when `None`), with their current level.
    pub fn low_stock(&self, threshold: Option<u64>) -> BTreeMap<ProductName, u64> {
        let threshold = threshold.unwrap_or(self.config.low_stock_threshold);
        self.registry.collect(|p| {
            let level = p.stock_level();
            (level < threshold).then_some(level)
        })
    }

    /// Reorder quantities that would bring each low product up to `target`.
    ///
    /// Products below `threshold` whose level already meets the target are
    /// skipped. `None` falls back to the configured values.
    pub fn replenishment(
        &self,
        target: Option<u64>,
        threshold: Option<u64>,
    ) -> Vec<ReplenishmentSuggestion> {
        let target = target.unwrap_or(self.config.replenish_target);
        self.low_stock(threshold)
            .into_iter()
            .filter_map(|(product, level)| {
                let needed_quantity = target.saturating_sub(level);
                (needed_quantity > 0).then_some(ReplenishmentSuggestion {
                    product,
                    needed_quantity,
                })
            })
            .collect()
    }
}
