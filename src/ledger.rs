//! Asset ledger orchestration
//!
//! Composes asset records and the append-only transaction log over one
//! [`WorldState`] so that every balance-affecting mutation is reflected in
//! both within a single logical invocation. The asset write and the
//! transaction append travel in one batch; the store commits them together
//! or not at all.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::asset::{
    history_range, Asset, Transaction, STATUS_ACTIVE, TRANS_CREATE, TRANS_CREDIT, TRANS_DEBIT,
    TRANS_INITIAL, TXN_PREFIX,
};
use crate::error::{LedgerError, Result};
use crate::store::{WorldState, WriteBatch};

/// Seed set written by [`AssetLedger::init_ledger`]: (dealer, msisdn, mpin, balance)
const SEED_ASSETS: [(&str, &str, &str, f64); 3] = [
    ("DEALER001", "1234567890", "1234", 1000.0),
    ("DEALER002", "1234567891", "5678", 2000.0),
    ("DEALER003", "1234567892", "9012", 1500.0),
];

pub struct AssetLedger {
    store: Arc<dyn WorldState>,
    // Uniquifies transaction ids minted within the same second
    seq: AtomicU64,
}

impl AssetLedger {
    pub fn new(store: Arc<dyn WorldState>) -> Self {
        AssetLedger {
            store,
            seq: AtomicU64::new(0),
        }
    }

    /// Writes the fixed seed set, silently overwriting existing records.
    /// Bootstrap/demo use only; no transaction records are appended.
    pub fn init_ledger(&self) -> Result<()> {
        let now = Utc::now();
        for (dealer_id, msisdn, mpin, balance) in SEED_ASSETS {
            let asset = Asset {
                msisdn: msisdn.to_string(),
                dealer_id: dealer_id.to_string(),
                mpin: mpin.to_string(),
                balance,
                status: STATUS_ACTIVE.to_string(),
                trans_amount: 0.0,
                trans_type: TRANS_INITIAL.to_string(),
                remarks: "Initial balance".to_string(),
                created_at: now,
                updated_at: now,
            };
            self.store.put(msisdn, &asset.to_bytes()?)?;
        }
        info!("Seeded {} default assets", SEED_ASSETS.len());
        Ok(())
    }

    /// Issues a new asset and records the creation transaction.
    pub fn create_asset(
        &self,
        msisdn: &str,
        dealer_id: &str,
        mpin: &str,
        balance: f64,
        status: &str,
        remarks: &str,
    ) -> Result<Asset> {
        if self.asset_exists(msisdn)? {
            return Err(LedgerError::AlreadyExists(msisdn.to_string()));
        }

        let now = Utc::now();
        let asset = Asset {
            msisdn: msisdn.to_string(),
            dealer_id: dealer_id.to_string(),
            mpin: mpin.to_string(),
            balance,
            status: status.to_string(),
            trans_amount: 0.0,
            trans_type: TRANS_CREATE.to_string(),
            remarks: remarks.to_string(),
            created_at: now,
            updated_at: now,
        };
        let tx = self.new_transaction(msisdn, TRANS_CREATE, balance, 0.0, balance, remarks);

        let mut batch = WriteBatch::new();
        batch.put(msisdn, asset.to_bytes()?);
        batch.put(tx.key(), tx.to_bytes()?);
        self.store.apply(batch)?;

        info!("Created asset {} for dealer {}", msisdn, dealer_id);
        Ok(asset)
    }

    /// Returns the asset stored under the given subscriber id.
    pub fn read_asset(&self, msisdn: &str) -> Result<Asset> {
        let bytes = self
            .store
            .get(msisdn)?
            .ok_or_else(|| LedgerError::NotFound(msisdn.to_string()))?;
        Asset::from_bytes(msisdn, &bytes)
    }

    /// Credits or debits an active asset after MPIN verification, and
    /// appends the matching transaction record.
    pub fn update_balance(
        &self,
        msisdn: &str,
        mpin: &str,
        amount: f64,
        trans_type: &str,
        remarks: &str,
    ) -> Result<Asset> {
        let mut asset = self.read_asset(msisdn)?;

        if asset.mpin != mpin {
            return Err(LedgerError::InvalidMpin(msisdn.to_string()));
        }
        if !asset.is_active() {
            return Err(LedgerError::NotActive(msisdn.to_string()));
        }

        let prev_balance = asset.balance;
        match trans_type {
            TRANS_CREDIT => asset.balance += amount,
            TRANS_DEBIT => {
                if amount > asset.balance {
                    return Err(LedgerError::InsufficientBalance {
                        current: asset.balance,
                        requested: amount,
                    });
                }
                asset.balance -= amount;
            }
            other => return Err(LedgerError::InvalidTransType(other.to_string())),
        }

        asset.trans_amount = amount;
        asset.trans_type = trans_type.to_string();
        asset.remarks = remarks.to_string();
        asset.updated_at = Utc::now();

        let tx = self.new_transaction(
            msisdn,
            trans_type,
            amount,
            prev_balance,
            asset.balance,
            remarks,
        );

        let mut batch = WriteBatch::new();
        batch.put(msisdn, asset.to_bytes()?);
        batch.put(tx.key(), tx.to_bytes()?);
        self.store.apply(batch)?;

        info!(
            "{} {:.2} on asset {}: balance {:.2} -> {:.2}",
            trans_type, amount, msisdn, prev_balance, asset.balance
        );
        Ok(asset)
    }

    /// Sets the status tag unconditionally. No MPIN check, no transaction
    /// record.
    pub fn update_status(&self, msisdn: &str, new_status: &str, remarks: &str) -> Result<Asset> {
        let mut asset = self.read_asset(msisdn)?;

        asset.status = new_status.to_string();
        asset.remarks = remarks.to_string();
        asset.updated_at = Utc::now();

        self.store.put(msisdn, &asset.to_bytes()?)?;
        info!("Asset {} status set to {}", msisdn, new_status);
        Ok(asset)
    }

    /// Removes the asset record. Its transaction history stays behind,
    /// orphaned.
    pub fn delete_asset(&self, msisdn: &str) -> Result<()> {
        if !self.asset_exists(msisdn)? {
            return Err(LedgerError::NotFound(msisdn.to_string()));
        }
        self.store.delete(msisdn)?;
        info!("Deleted asset {}", msisdn);
        Ok(())
    }

    pub fn asset_exists(&self, msisdn: &str) -> Result<bool> {
        Ok(self.store.get(msisdn)?.is_some())
    }

    /// Every asset in the world state, in key order.
    pub fn get_all_assets(&self) -> Result<Vec<Asset>> {
        let pairs = self.store.range_scan("", "")?;

        let mut assets = Vec::new();
        for (key, value) in pairs {
            // Transaction records share the key space; the prefix keeps them out
            if key.starts_with(TXN_PREFIX) {
                continue;
            }
            assets.push(Asset::from_bytes(&key, &value)?);
        }
        Ok(assets)
    }

    /// Transaction history for one asset, in creation order. The key range
    /// only scopes the scan; ordering comes from the timestamp field.
    pub fn transaction_history(&self, msisdn: &str) -> Result<Vec<Transaction>> {
        let (start, end) = history_range(msisdn);
        let pairs = self.store.range_scan(&start, &end)?;

        let mut transactions = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            transactions.push(Transaction::from_bytes(&key, &value)?);
        }
        transactions.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(
            "History for {}: {} transactions",
            msisdn,
            transactions.len()
        );
        Ok(transactions)
    }

    fn new_transaction(
        &self,
        msisdn: &str,
        trans_type: &str,
        amount: f64,
        prev_balance: f64,
        new_balance: f64,
        remarks: &str,
    ) -> Transaction {
        let now = Utc::now();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        Transaction {
            id: format!("{}-{}-{}-{:06}", msisdn, trans_type, now.timestamp(), seq),
            asset_id: msisdn.to_string(),
            trans_type: trans_type.to_string(),
            amount,
            prev_balance,
            new_balance,
            remarks: remarks.to_string(),
            timestamp: now,
            tx_id: format!("inv-{}-{:06}", now.timestamp(), seq),
        }
    }
}
