//! Configuration loading and representation.
//!
//! Values come from `STOCKLEDGER_*` environment variables. Anything missing or
//! malformed falls back to the default with a warning; startup never fails on
//! configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 10;
pub const DEFAULT_REPLENISH_TARGET: u64 = 100;

pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKLEDGER_LOW_STOCK_THRESHOLD";
pub const REPLENISH_TARGET_VAR: &str = "STOCKLEDGER_REPLENISH_TARGET";
pub const EXPIRED_SALES_VAR: &str = "STOCKLEDGER_EXPIRED_SALES";

/// Whether a sale may consume batches that are already past their expiry date.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiredSalePolicy {
    /// Expired batches are sold like any other (FIFO over the whole ledger).
    #[default]
    Allow,
    /// Expired batches are skipped and do not count as available stock.
    Block,
}

impl FromStr for ExpiredSalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "block" => Ok(Self::Block),
            other => Err(format!("expected `allow` or `block`, got `{other}`")),
        }
    }
}

/// Inventory policy knobs shared by the registry and the reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Products with `stock_level` strictly below this are low on stock.
    pub low_stock_threshold: u64,
    /// Level a replenishment order tops a low product up to.
    pub replenish_target: u64,
    pub expired_sales: ExpiredSalePolicy,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            replenish_target: DEFAULT_REPLENISH_TARGET,
            expired_sales: ExpiredSalePolicy::Allow,
        }
    }
}

impl InventoryConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests pass a map instead of the env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            low_stock_threshold: parse_or(
                &lookup,
                LOW_STOCK_THRESHOLD_VAR,
                defaults.low_stock_threshold,
            ),
            replenish_target: parse_or(&lookup, REPLENISH_TARGET_VAR, defaults.replenish_target),
            expired_sales: parse_or(&lookup, EXPIRED_SALES_VAR, defaults.expired_sales),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + core::fmt::Debug,
    T::Err: core::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, ?default, "invalid config value; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = InventoryConfig::from_lookup(|_| None);
        assert_eq!(config, InventoryConfig::default());
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.replenish_target, 100);
        assert_eq!(config.expired_sales, ExpiredSalePolicy::Allow);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = InventoryConfig::from_lookup(lookup_from(&[
            (LOW_STOCK_THRESHOLD_VAR, "25"),
            (REPLENISH_TARGET_VAR, " 500 "),
            (EXPIRED_SALES_VAR, "Block"),
        ]));
        assert_eq!(config.low_stock_threshold, 25);
        assert_eq!(config.replenish_target, 500);
        assert_eq!(config.expired_sales, ExpiredSalePolicy::Block);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = InventoryConfig::from_lookup(lookup_from(&[
            (LOW_STOCK_THRESHOLD_VAR, "-1"),
            (REPLENISH_TARGET_VAR, "lots"),
            (EXPIRED_SALES_VAR, "sometimes"),
        ]));
        assert_eq!(config, InventoryConfig::default());
    }
}
