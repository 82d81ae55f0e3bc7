use anyhow::{Context, Result};
use clap::Parser;

use reserve_audit::{sample_payload, RecordExport, TriggeredBy};

/// Emits a sample exported record, useful for exercising audit-verify
/// without a cluster.
#[derive(Parser)]
#[command(name = "audit-sample", version)]
struct Cli {
    /// Mark the sweep as forced by a withdrawal failure
    #[arg(long)]
    withdrawal_failure: bool,
    /// Audit epoch to stamp on the record
    #[arg(long, default_value_t = 1)]
    epoch: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let trigger = if cli.withdrawal_failure {
        TriggeredBy::WithdrawalFailure
    } else {
        TriggeredBy::Scheduled
    };
    let payload = sample_payload(trigger);
    let record = RecordExport {
        epoch: cli.epoch,
        timestamp: 1_700_000_000,
        circulating_supply: 5_000_000_000_000,
        spendable_balance: 4_999_970_000_000,
        unconfirmed_balance: 0,
        data: serde_json::to_string(&payload).context("serialize payload")?,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("serialize record")?
    );
    Ok(())
}
