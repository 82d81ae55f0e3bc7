//! Reserve-proof record parsing and reconciliation.
//!
//! Each on-chain audit record carries a JSON payload describing the XMR
//! consolidation sweep for one epoch. Records created first and extended
//! later hold several payloads concatenated back to back; the parser
//! accepts the whole stream.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggeredBy {
    /// Routine scheduled consolidation.
    Scheduled,
    /// Sweep forced by a withdrawal the hot wallet could not cover.
    WithdrawalFailure,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SweptTx {
    pub txid: String,
    pub tx_key: String,
    /// Piconero moved by this transfer.
    pub amount: u64,
    /// Piconero paid in network fees.
    pub fee: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuditPayload {
    pub txs: Vec<SweptTx>,
    /// Piconero still waiting for confirmations at sweep time.
    pub unconfirmed: u64,
    pub triggered_by: TriggeredBy,
    /// Consolidation destination address.
    pub destination: String,
    pub total_fees: u64,
}

impl AuditPayload {
    pub fn swept_amount(&self) -> u64 {
        self.txs.iter().map(|tx| tx.amount).sum()
    }

    pub fn summed_fees(&self) -> u64 {
        self.txs.iter().map(|tx| tx.fee).sum()
    }

    /// The payload's own fee total must match the per-tx fees.
    pub fn validate(&self) -> Result<()> {
        if self.txs.is_empty() {
            return Err(anyhow!("payload lists no transactions"));
        }
        if self.summed_fees() != self.total_fees {
            return Err(anyhow!(
                "fee mismatch: txs sum to {}, payload claims {}",
                self.summed_fees(),
                self.total_fees
            ));
        }
        for tx in &self.txs {
            if tx.txid.len() != 64 {
                return Err(anyhow!("txid {} is not 64 hex chars", tx.txid));
            }
        }
        Ok(())
    }
}

/// Exported view of one on-chain audit record, as audit_verify consumes it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RecordExport {
    pub epoch: u64,
    pub timestamp: i64,
    pub circulating_supply: u64,
    pub spendable_balance: u64,
    pub unconfirmed_balance: u64,
    pub data: String,
}

/// Parses the concatenated payload stream from a record's data field.
pub fn parse_payloads(data: &str) -> Result<Vec<AuditPayload>> {
    let mut payloads = Vec::new();
    let stream = serde_json::Deserializer::from_str(data).into_iter::<AuditPayload>();
    for payload in stream {
        payloads.push(payload.context("parse audit payload")?);
    }
    if payloads.is_empty() {
        return Err(anyhow!("record data holds no payloads"));
    }
    Ok(payloads)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Reserves (spendable + unconfirmed + fees already paid) against the
    /// circulating supply.
    pub backing: u64,
    pub circulating_supply: u64,
    pub shortfall: u64,
}

impl Reconciliation {
    pub fn is_fully_backed(&self) -> bool {
        self.shortfall == 0
    }
}

/// Checks one exported record end to end: every payload internally
/// consistent, then reserves against supply. Fees burned by consolidation
/// count toward backing because they left the reserve for a provable cause.
pub fn reconcile(record: &RecordExport) -> Result<Reconciliation> {
    let payloads = parse_payloads(&record.data)?;
    let mut fees = 0u64;
    for payload in &payloads {
        payload.validate()?;
        fees = fees
            .checked_add(payload.total_fees)
            .ok_or_else(|| anyhow!("fee total overflow"))?;
    }

    let backing = record
        .spendable_balance
        .checked_add(record.unconfirmed_balance)
        .and_then(|sum| sum.checked_add(fees))
        .ok_or_else(|| anyhow!("backing overflow"))?;
    let shortfall = record.circulating_supply.saturating_sub(backing);
    Ok(Reconciliation {
        backing,
        circulating_supply: record.circulating_supply,
        shortfall,
    })
}

pub fn record_hash_hex(record: &RecordExport) -> Result<String> {
    let bytes = serde_json::to_vec(record).context("serialize record")?;
    Ok(hex_encode(&Sha256::digest(&bytes)))
}

pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

pub fn sample_payload(triggered_by: TriggeredBy) -> AuditPayload {
    AuditPayload {
        txs: vec![SweptTx {
            txid: "ab".repeat(32),
            tx_key: "cd".repeat(32),
            amount: 5_000_000_000_000,
            fee: 30_000_000,
        }],
        unconfirmed: 0,
        triggered_by,
        destination: {
            let mut s = String::with_capacity(95);
            s.push('4');
            while s.len() < 95 {
                s.push('A');
            }
            s
        },
        total_fees: 30_000_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(data: String, circulating: u64, spendable: u64) -> RecordExport {
        RecordExport {
            epoch: 1,
            timestamp: 1_700_000_000,
            circulating_supply: circulating,
            spendable_balance: spendable,
            unconfirmed_balance: 0,
            data,
        }
    }

    #[test]
    fn parses_a_single_payload() {
        let data = serde_json::to_string(&sample_payload(TriggeredBy::Scheduled)).unwrap();
        let payloads = parse_payloads(&data).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].swept_amount(), 5_000_000_000_000);
    }

    #[test]
    fn parses_concatenated_payloads() {
        let one = serde_json::to_string(&sample_payload(TriggeredBy::Scheduled)).unwrap();
        let two =
            serde_json::to_string(&sample_payload(TriggeredBy::WithdrawalFailure)).unwrap();
        let payloads = parse_payloads(&format!("{one}{two}")).unwrap();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[1].triggered_by, TriggeredBy::WithdrawalFailure);
    }

    #[test]
    fn rejects_truncated_data() {
        let mut data = serde_json::to_string(&sample_payload(TriggeredBy::Scheduled)).unwrap();
        data.truncate(data.len() - 5);
        assert!(parse_payloads(&data).is_err());
    }

    #[test]
    fn fee_mismatch_fails_validation() {
        let mut payload = sample_payload(TriggeredBy::Scheduled);
        payload.total_fees += 1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn fully_backed_record_reconciles_clean() {
        let data = serde_json::to_string(&sample_payload(TriggeredBy::Scheduled)).unwrap();
        // Supply 10 XMR, spendable covers it minus the 0.00003 XMR in fees.
        let record = record_with(data, 10_000_000_000_000, 9_999_970_000_000);
        let result = reconcile(&record).unwrap();
        assert!(result.is_fully_backed());
        assert_eq!(result.shortfall, 0);
    }

    #[test]
    fn shortfall_is_reported() {
        let data = serde_json::to_string(&sample_payload(TriggeredBy::Scheduled)).unwrap();
        let record = record_with(data, 10_000_000_000_000, 8_000_000_000_000);
        let result = reconcile(&record).unwrap();
        assert!(!result.is_fully_backed());
        assert_eq!(result.shortfall, 10_000_000_000_000 - 8_000_030_000_000);
    }

    #[test]
    fn record_hash_is_stable() {
        let data = serde_json::to_string(&sample_payload(TriggeredBy::Scheduled)).unwrap();
        let record = record_with(data, 1, 1);
        assert_eq!(
            record_hash_hex(&record).unwrap(),
            record_hash_hex(&record).unwrap()
        );
    }
}
