use std::path::PathBuf;

use anchor_lang::AccountDeserialize;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

use reserve_audit::{parse_payloads, reconcile, record_hash_hex, RecordExport};
use wxmr_bridge::state::AuditRecord;

/// Verifies one reserve-audit record: payload consistency, then reserves
/// against circulating supply.
#[derive(Parser)]
#[command(name = "audit-verify", version)]
struct Cli {
    /// Exported record JSON (from a prior fetch)
    #[arg(long, conflicts_with = "rpc")]
    input: Option<PathBuf>,
    /// Solana RPC URL to fetch the record from
    #[arg(long, requires = "epoch")]
    rpc: Option<String>,
    /// Audit epoch to fetch
    #[arg(long)]
    epoch: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let record = match (&cli.input, &cli.rpc) {
        (Some(path), None) => load_record(path)?,
        (None, Some(rpc)) => {
            let epoch = cli.epoch.ok_or_else(|| anyhow!("--epoch required with --rpc"))?;
            fetch_record(rpc, epoch).await?
        }
        _ => return Err(anyhow!("pass exactly one of --input or --rpc")),
    };

    let payloads = parse_payloads(&record.data)?;
    let result = reconcile(&record)?;

    println!("epoch: {}", record.epoch);
    println!("record_hash: {}", record_hash_hex(&record)?);
    println!("payloads: {}", payloads.len());
    println!(
        "swept: {} piconero across {} txs",
        payloads.iter().map(|p| p.swept_amount()).sum::<u64>(),
        payloads.iter().map(|p| p.txs.len()).sum::<usize>()
    );
    println!("circulating_supply: {}", result.circulating_supply);
    println!("backing: {}", result.backing);

    if result.is_fully_backed() {
        println!("status: fully backed");
        Ok(())
    } else {
        println!("status: SHORTFALL {} piconero", result.shortfall);
        Err(anyhow!("reserves do not cover circulating supply"))
    }
}

fn load_record(path: &PathBuf) -> Result<RecordExport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read record {}", path.display()))?;
    serde_json::from_str(&raw).context("parse record export")
}

async fn fetch_record(rpc_url: &str, epoch: u64) -> Result<RecordExport> {
    let rpc = RpcClient::new(rpc_url.to_string());
    let (address, _bump) = Pubkey::find_program_address(
        &[AuditRecord::SEED_PREFIX, &epoch.to_le_bytes()],
        &wxmr_bridge::ID,
    );
    let account = rpc
        .get_account(&address)
        .await
        .with_context(|| format!("fetch audit record for epoch {epoch}"))?;
    let record = AuditRecord::try_deserialize(&mut account.data.as_slice())
        .context("decode audit record")?;
    Ok(RecordExport {
        epoch: record.epoch,
        timestamp: record.timestamp,
        circulating_supply: record.circulating_supply,
        spendable_balance: record.spendable_balance,
        unconfirmed_balance: record.unconfirmed_balance,
        data: record.data,
    })
}
