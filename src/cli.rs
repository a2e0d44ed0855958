//! Shared plumbing for the CLI binaries

use std::sync::Arc;

use crate::config::{load_config, Config};
use crate::ledger::AssetLedger;
use crate::persistence::Database;

/// Opens the configured database and wraps it in a ledger.
pub fn open_ledger_from_config() -> Result<(Config, AssetLedger), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let db = Database::open(&config.database.path)?;
    let ledger = AssetLedger::new(Arc::new(db));
    Ok((config, ledger))
}
