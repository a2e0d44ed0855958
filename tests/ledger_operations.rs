//! Integration tests for ledger operations against the SQLite-backed store

use std::sync::Arc;

use tempfile::TempDir;

use airledger::asset::{STATUS_ACTIVE, TRANS_CREATE, TRANS_CREDIT, TRANS_DEBIT};
use airledger::error::LedgerError;
use airledger::ledger::AssetLedger;
use airledger::persistence::Database;

/// Helper to open a ledger over a fresh on-disk database
fn open_test_ledger(dir: &TempDir) -> Result<AssetLedger, Box<dyn std::error::Error>> {
    let path = dir.path().join("ledger.db");
    let db = Database::open(path.to_str().ok_or("non-utf8 temp path")?)?;
    Ok(AssetLedger::new(Arc::new(db)))
}

#[test]
fn test_subscriber_lifecycle_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let ledger = open_test_ledger(&dir)?;

    // Create with an opening balance of 100
    let asset = ledger.create_asset("1111111111", "D1", "0000", 100.0, STATUS_ACTIVE, "opening")?;
    assert_eq!(asset.balance, 100.0);

    // Credit 50 -> 150
    let asset = ledger.update_balance("1111111111", "0000", 50.0, TRANS_CREDIT, "topup")?;
    assert_eq!(asset.balance, 150.0);

    // Over-debit is rejected with the exact balance message
    let err = ledger
        .update_balance("1111111111", "0000", 200.0, TRANS_DEBIT, "purchase")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "insufficient balance. Current balance: 150.00, Requested: 200.00"
    );

    // Debit the full 150 -> 0
    let asset = ledger.update_balance("1111111111", "0000", 150.0, TRANS_DEBIT, "drain")?;
    assert_eq!(asset.balance, 0.0);

    // Three records, in creation order, with chained balances
    let history = ledger.transaction_history("1111111111")?;
    assert_eq!(history.len(), 3);

    let types: Vec<_> = history.iter().map(|tx| tx.trans_type.as_str()).collect();
    assert_eq!(types, vec![TRANS_CREATE, TRANS_CREDIT, TRANS_DEBIT]);

    assert_eq!(history[0].prev_balance, 0.0);
    assert_eq!(history[0].new_balance, 100.0);
    assert_eq!(history[1].prev_balance, 100.0);
    assert_eq!(history[1].new_balance, 150.0);
    assert_eq!(history[2].prev_balance, 150.0);
    assert_eq!(history[2].new_balance, 0.0);

    Ok(())
}

#[test]
fn test_records_survive_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("ledger.db");
    let path_str = path.to_str().ok_or("non-utf8 temp path")?;

    {
        let ledger = AssetLedger::new(Arc::new(Database::open(path_str)?));
        ledger.create_asset("2222222222", "D9", "4321", 75.0, STATUS_ACTIVE, "")?;
        ledger.update_balance("2222222222", "4321", 25.0, TRANS_CREDIT, "")?;
    }

    // A fresh connection sees the same world state
    let ledger = AssetLedger::new(Arc::new(Database::open(path_str)?));
    let asset = ledger.read_asset("2222222222")?;
    assert_eq!(asset.balance, 100.0);
    assert_eq!(ledger.transaction_history("2222222222")?.len(), 2);

    Ok(())
}

#[test]
fn test_seeded_ledger_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let ledger = open_test_ledger(&dir)?;

    ledger.init_ledger()?;
    let assets = ledger.get_all_assets()?;
    assert_eq!(assets.len(), 3);

    // Seed assets carry no history; mutations start recording
    assert!(ledger.transaction_history("1234567890")?.is_empty());
    ledger.update_balance("1234567890", "1234", 100.0, TRANS_DEBIT, "bundle sale")?;
    assert_eq!(ledger.read_asset("1234567890")?.balance, 900.0);
    assert_eq!(ledger.transaction_history("1234567890")?.len(), 1);

    // Wrong MPIN against a seeded asset
    let err = ledger
        .update_balance("1234567891", "0000", 1.0, TRANS_CREDIT, "")
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidMpin(_)));

    Ok(())
}

#[test]
fn test_delete_then_list_excludes_asset() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let ledger = open_test_ledger(&dir)?;

    ledger.create_asset("3333333333", "D2", "1111", 10.0, STATUS_ACTIVE, "")?;
    ledger.create_asset("4444444444", "D2", "2222", 20.0, STATUS_ACTIVE, "")?;

    ledger.delete_asset("3333333333")?;
    assert!(matches!(
        ledger.read_asset("3333333333").unwrap_err(),
        LedgerError::NotFound(_)
    ));

    let remaining = ledger.get_all_assets()?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].msisdn, "4444444444");

    // The deleted subscriber's CREATE record is still in the log
    assert_eq!(ledger.transaction_history("3333333333")?.len(), 1);

    Ok(())
}

#[test]
fn test_suspended_asset_blocks_mutation() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let ledger = open_test_ledger(&dir)?;

    ledger.create_asset("5555555555", "D3", "9999", 500.0, STATUS_ACTIVE, "")?;
    ledger.update_status("5555555555", "SUSPENDED", "chargeback review")?;

    let err = ledger
        .update_balance("5555555555", "9999", 50.0, TRANS_DEBIT, "")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotActive(_)));
    assert_eq!(ledger.read_asset("5555555555")?.balance, 500.0);

    Ok(())
}
