/// Record types for the asset ledger
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Transaction types recognized by the balance rule
pub const TRANS_CREATE: &str = "CREATE";
pub const TRANS_CREDIT: &str = "CREDIT";
pub const TRANS_DEBIT: &str = "DEBIT";
/// Used only by the ledger seed set
pub const TRANS_INITIAL: &str = "INITIAL";

/// The only status value that permits balance mutation
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// Key prefix separating transaction records from assets in the shared key space
pub const TXN_PREFIX: &str = "TXN_";

/// One asset record per subscriber, keyed by MSISDN.
///
/// Field names stay camelCase on the wire so records decode by name
/// regardless of field order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub msisdn: String,
    pub dealer_id: String,
    pub mpin: String,
    pub balance: f64,
    pub status: String,
    pub trans_amount: f64,
    pub trans_type: String,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| LedgerError::Store(format!("failed to encode asset {}: {}", self.msisdn, e)))
    }

    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Asset> {
        serde_json::from_slice(bytes).map_err(|e| LedgerError::Deserialize {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Append-only transaction history entry. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub asset_id: String,
    pub trans_type: String,
    pub amount: f64,
    pub prev_balance: f64,
    pub new_balance: f64,
    pub remarks: String,
    pub timestamp: DateTime<Utc>,
    pub tx_id: String,
}

impl Transaction {
    /// Storage key for this record
    pub fn key(&self) -> String {
        format!("{}{}", TXN_PREFIX, self.id)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            LedgerError::Store(format!("failed to encode transaction {}: {}", self.id, e))
        })
    }

    pub fn from_bytes(key: &str, bytes: &[u8]) -> Result<Transaction> {
        serde_json::from_slice(bytes).map_err(|e| LedgerError::Deserialize {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

/// `[start, end)` key range holding exactly one asset's transaction records.
///
/// Ids are `{msisdn}-{transType}-...`, so `-` opens the range and `~`,
/// which sorts after every character a trans-type segment can contain,
/// closes it.
pub fn history_range(msisdn: &str) -> (String, String) {
    (
        format!("{}{}-", TXN_PREFIX, msisdn),
        format!("{}{}~", TXN_PREFIX, msisdn),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_range_encloses_txn_keys() {
        let (start, end) = history_range("1234567890");
        let tx = Transaction {
            id: "1234567890-CREDIT-1700000000-000001".to_string(),
            asset_id: "1234567890".to_string(),
            trans_type: TRANS_CREDIT.to_string(),
            amount: 10.0,
            prev_balance: 0.0,
            new_balance: 10.0,
            remarks: String::new(),
            timestamp: Utc::now(),
            tx_id: "inv-1".to_string(),
        };
        let key = tx.key();
        assert!(key.as_str() >= start.as_str() && key.as_str() < end.as_str());

        // A neighbouring subscriber's records fall outside the range
        assert!("TXN_1234567891-CREDIT-1700000000-000002" >= end.as_str());
    }

    #[test]
    fn test_wire_fields_are_camel_case() {
        let asset = Asset {
            msisdn: "1111111111".to_string(),
            dealer_id: "D1".to_string(),
            mpin: "0000".to_string(),
            balance: 100.0,
            status: STATUS_ACTIVE.to_string(),
            trans_amount: 0.0,
            trans_type: TRANS_CREATE.to_string(),
            remarks: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value: serde_json::Value = serde_json::from_slice(&asset.to_bytes().unwrap()).unwrap();
        assert!(value.get("dealerId").is_some());
        assert!(value.get("transAmount").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
