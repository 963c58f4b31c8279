use clap::Parser;

use stockledger_cli::Cli;
use stockledger_observability::LogFormat;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stockledger_observability::init(cli.log_format.unwrap_or_else(LogFormat::from_env));

    let report = stockledger_cli::run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
