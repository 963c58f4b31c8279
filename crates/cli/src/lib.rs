//! `stockledger` command line: replay a journal, print one report as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;

use stockledger_infra::{InventoryConfig, InventoryReports, ProductRegistry, parse_journal, replay};
use stockledger_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "stockledger", about = "FIFO batch inventory reports")]
pub struct Cli {
    /// JSON journal of register/intake/sale entries to replay.
    #[arg(long, short)]
    pub journal: PathBuf,

    /// Log format (defaults to STOCKLEDGER_LOG_FORMAT, then json).
    #[arg(long, value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,

    /// Fail instead of printing the report when any journal entry is rejected.
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub report: Report,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Report {
    /// Stock level and sales per product.
    Stock {
        /// Only this product.
        #[arg(long)]
        product: Option<String>,
    },
    /// Products below the low-stock threshold.
    LowStock {
        #[arg(long)]
        threshold: Option<u64>,
    },
    /// Suggested reorder quantities for low products.
    Replenishment {
        #[arg(long)]
        target: Option<u64>,
        #[arg(long)]
        threshold: Option<u64>,
    },
    /// Remaining batches in FIFO order.
    Batches {
        #[arg(long)]
        product: Option<String>,
    },
    /// Batches past their expiry date.
    Expired {
        /// Reference date (YYYY-MM-DD); today when omitted.
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Stock against lifetime units sold.
    Audit,
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    s.parse()
}

/// Replay the journal and build the requested report.
pub fn run(cli: &Cli) -> anyhow::Result<JsonValue> {
    run_with_config(cli, InventoryConfig::from_env())
}

pub fn run_with_config(cli: &Cli, config: InventoryConfig) -> anyhow::Result<JsonValue> {
    let raw = std::fs::read_to_string(&cli.journal)
        .with_context(|| format!("failed to read journal {}", cli.journal.display()))?;
    let entries = parse_journal(&raw)
        .with_context(|| format!("invalid journal {}", cli.journal.display()))?;

    let registry = Arc::new(ProductRegistry::with_policy(config.expired_sales));
    let summary = replay(&registry, entries);
    if cli.strict && !summary.rejected.is_empty() {
        let first = &summary.rejected[0];
        anyhow::bail!(
            "{} journal entries rejected (first at index {}: {})",
            summary.rejected.len(),
            first.index,
            first.error
        );
    }

    let reports = InventoryReports::new(registry, config);
    build_report(&reports, &cli.report)
}

pub fn build_report(reports: &InventoryReports, report: &Report) -> anyhow::Result<JsonValue> {
    let value = match report {
        Report::Stock { product: Some(name) } => serde_json::to_value(reports.stock_snapshot(name)?)?,
        Report::Stock { product: None } => serde_json::to_value(reports.stock_levels())?,
        Report::LowStock { threshold } => serde_json::to_value(reports.low_stock(*threshold))?,
        Report::Replenishment { target, threshold } => {
            serde_json::to_value(reports.replenishment(*target, *threshold))?
        }
        Report::Batches { product: Some(name) } => serde_json::to_value(reports.batches(name)?)?,
        Report::Batches { product: None } => serde_json::to_value(reports.all_batches())?,
        Report::Expired { as_of } => {
            let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
            serde_json::to_value(reports.expired(as_of))?
        }
        Report::Audit => serde_json::to_value(reports.audit())?,
    };
    Ok(value)
}
