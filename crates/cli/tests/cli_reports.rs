use std::io::Write;

use clap::Parser;
use serde_json::json;
use tempfile::NamedTempFile;

use stockledger_cli::{Cli, run_with_config};
use stockledger_infra::{ExpiredSalePolicy, InventoryConfig};

const JOURNAL: &str = r#"[
    { "op": "register", "product": "Milk", "category": "dairy", "size": "1L", "price": 120 },
    { "op": "intake", "product": "Milk", "quantity": 100, "batch_number": "B1", "expiry_date": "2025-01-01" },
    { "op": "intake", "product": "Milk", "quantity": 50, "batch_number": "B2", "expiry_date": "2025-06-01" },
    { "op": "sale", "product": "Milk", "quantity": 120, "as_of": "2024-12-15" },
    { "op": "intake", "product": "Cheese", "quantity": 5, "batch_number": "C1", "expiry_date": "2020-01-01" },
    { "op": "intake", "product": "Rice", "quantity": 40, "batch_number": "R1", "expiry_date": "2030-01-01" }
]"#;

fn journal_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp journal");
    file.write_all(contents.as_bytes()).expect("failed to write journal");
    file
}

fn run_report(file: &NamedTempFile, args: &[&str]) -> anyhow::Result<serde_json::Value> {
    run_report_with(file, args, InventoryConfig::default())
}

fn run_report_with(
    file: &NamedTempFile,
    args: &[&str],
    config: InventoryConfig,
) -> anyhow::Result<serde_json::Value> {
    let path = file.path().to_str().unwrap();
    let mut argv = vec!["stockledger", "--journal", path];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    run_with_config(&cli, config)
}

#[test]
fn stock_report_lists_every_product() {
    let file = journal_file(JOURNAL);

    let report = run_report(&file, &["stock"]).unwrap();

    assert_eq!(
        report,
        json!({
            "Cheese": { "stock_level": 5, "sales": 0 },
            "Milk": { "stock_level": 30, "sales": 120 },
            "Rice": { "stock_level": 40, "sales": 0 },
        })
    );
}

#[test]
fn single_product_stock_and_unknown_product() {
    let file = journal_file(JOURNAL);

    let report = run_report(&file, &["stock", "--product", "Milk"]).unwrap();
    assert_eq!(report, json!({ "stock_level": 30, "sales": 120 }));

    let err = run_report(&file, &["stock", "--product", "Tea"]).unwrap_err();
    assert!(err.to_string().contains("unknown product"));
}

#[test]
fn low_stock_and_replenishment_use_overrides() {
    let file = journal_file(JOURNAL);

    assert_eq!(run_report(&file, &["low-stock"]).unwrap(), json!({ "Cheese": 5 }));
    assert_eq!(
        run_report(&file, &["low-stock", "--threshold", "35"]).unwrap(),
        json!({ "Cheese": 5, "Milk": 30 })
    );
    assert_eq!(
        run_report(&file, &["replenishment", "--target", "60", "--threshold", "35"]).unwrap(),
        json!([
            { "product": "Cheese", "needed_quantity": 55 },
            { "product": "Milk", "needed_quantity": 30 },
        ])
    );
}

#[test]
fn batch_and_expiry_reports() {
    let file = journal_file(JOURNAL);

    assert_eq!(
        run_report(&file, &["batches", "--product", "Milk"]).unwrap(),
        json!([{ "batch_number": "B2", "quantity": 30, "expiry_date": "2025-06-01" }])
    );
    assert_eq!(
        run_report(&file, &["expired", "--as-of", "2025-03-01"]).unwrap(),
        json!({ "Cheese": [{ "batch_number": "C1", "expiry_date": "2020-01-01" }] })
    );
}

#[test]
fn audit_report_uses_sold_field() {
    let file = journal_file(JOURNAL);

    let report = run_report(&file, &["audit"]).unwrap();

    assert_eq!(report["Milk"], json!({ "stock_level": 30, "sold": 120 }));
}

#[test]
fn block_policy_changes_replayed_sales() {
    let file = journal_file(
        r#"[
            { "op": "intake", "product": "Yogurt", "quantity": 5, "batch_number": "OLD", "expiry_date": "2020-01-01" },
            { "op": "intake", "product": "Yogurt", "quantity": 5, "batch_number": "NEW", "expiry_date": "2030-01-01" },
            { "op": "sale", "product": "Yogurt", "quantity": 3, "as_of": "2025-01-01" }
        ]"#,
    );
    let config = InventoryConfig {
        expired_sales: ExpiredSalePolicy::Block,
        ..InventoryConfig::default()
    };

    let report = run_report_with(&file, &["batches"], config).unwrap();

    assert_eq!(
        report,
        json!({
            "Yogurt": [
                { "batch_number": "OLD", "quantity": 5, "expiry_date": "2020-01-01" },
                { "batch_number": "NEW", "quantity": 2, "expiry_date": "2030-01-01" },
            ]
        })
    );
}

#[test]
fn strict_mode_fails_on_rejected_entries() {
    let file = journal_file(
        r#"[{ "op": "sale", "product": "Milk", "quantity": 1, "as_of": "2025-01-01" }]"#,
    );

    assert_eq!(run_report(&file, &["audit"]).unwrap(), json!({}));
    let err = run_report(&file, &["--strict", "audit"]).unwrap_err();
    assert!(err.to_string().contains("1 journal entries rejected"));
}

#[test]
fn unreadable_journal_is_an_error() {
    let file = journal_file("not json");
    let err = run_report(&file, &["audit"]).unwrap_err();
    assert!(err.to_string().starts_with("invalid journal"));
}
