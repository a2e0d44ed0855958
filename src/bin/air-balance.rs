#![forbid(unsafe_code)]
use airledger::cli::open_ledger_from_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let msisdn = std::env::args()
        .nth(1)
        .ok_or("usage: air-balance <msisdn>")?;

    let (config, ledger) = open_ledger_from_config()?;
    let asset = ledger.read_asset(&msisdn)?;

    println!("Database: {}", config.database.path);
    println!("MSISDN: {}", asset.msisdn);
    println!("Dealer: {}", asset.dealer_id);
    println!("Status: {}", asset.status);
    println!("Balance: {:.2}", asset.balance);

    Ok(())
}
