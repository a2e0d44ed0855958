#![forbid(unsafe_code)]
//! Operator CLI covering every ledger operation

use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use airledger::asset::{Asset, TRANS_CREDIT, TRANS_DEBIT};
use airledger::cli::open_ledger_from_config;

#[derive(Parser)]
#[command(name = "air-ledger", version, about = "Manage dealer airtime assets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default seed assets (overwrites silently)
    Seed,
    /// Create a new asset
    Create {
        msisdn: String,
        dealer_id: String,
        mpin: String,
        balance: f64,
        #[arg(default_value = "ACTIVE")]
        status: String,
        #[arg(short, long, default_value = "")]
        remarks: String,
    },
    /// Show one asset
    Show { msisdn: String },
    /// List all assets
    List,
    /// Credit an asset's balance
    Credit {
        msisdn: String,
        mpin: String,
        amount: f64,
        #[arg(short, long, default_value = "")]
        remarks: String,
    },
    /// Debit an asset's balance
    Debit {
        msisdn: String,
        mpin: String,
        amount: f64,
        #[arg(short, long, default_value = "")]
        remarks: String,
    },
    /// Set an asset's status tag
    Status {
        msisdn: String,
        status: String,
        #[arg(short, long, default_value = "")]
        remarks: String,
    },
    /// Delete an asset (its history stays behind)
    Delete { msisdn: String },
    /// Show an asset's transaction history
    History { msisdn: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let (_config, ledger) = open_ledger_from_config()?;

    match cli.command {
        Command::Seed => {
            ledger.init_ledger()?;
            println!("{}", "Seeded default assets".green());
        }
        Command::Create {
            msisdn,
            dealer_id,
            mpin,
            balance,
            status,
            remarks,
        } => {
            let asset = ledger.create_asset(&msisdn, &dealer_id, &mpin, balance, &status, &remarks)?;
            println!("{}", format!("Created asset {}", asset.msisdn).green());
            print_asset(&asset);
        }
        Command::Show { msisdn } => {
            let asset = ledger.read_asset(&msisdn)?;
            print_asset(&asset);
        }
        Command::List => {
            let assets = ledger.get_all_assets()?;
            if assets.is_empty() {
                println!("{}", "No assets in the world state".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MSISDN", "Dealer", "Balance", "Status", "Updated"]);
            for asset in &assets {
                table.add_row(vec![
                    asset.msisdn.clone(),
                    asset.dealer_id.clone(),
                    format!("{:.2}", asset.balance),
                    asset.status.clone(),
                    asset.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]);
            }
            println!("{}", table);
            println!("{}", format!("{} asset(s)", assets.len()).bright_blue());
        }
        Command::Credit {
            msisdn,
            mpin,
            amount,
            remarks,
        } => {
            let asset = ledger.update_balance(&msisdn, &mpin, amount, TRANS_CREDIT, &remarks)?;
            println!(
                "{}",
                format!("Credited {:.2}, new balance {:.2}", amount, asset.balance).green()
            );
        }
        Command::Debit {
            msisdn,
            mpin,
            amount,
            remarks,
        } => {
            let asset = ledger.update_balance(&msisdn, &mpin, amount, TRANS_DEBIT, &remarks)?;
            println!(
                "{}",
                format!("Debited {:.2}, new balance {:.2}", amount, asset.balance).green()
            );
        }
        Command::Status {
            msisdn,
            status,
            remarks,
        } => {
            let asset = ledger.update_status(&msisdn, &status, &remarks)?;
            println!(
                "{}",
                format!("Asset {} status set to {}", asset.msisdn, asset.status).green()
            );
        }
        Command::Delete { msisdn } => {
            ledger.delete_asset(&msisdn)?;
            println!("{}", format!("Deleted asset {}", msisdn).green());
        }
        Command::History { msisdn } => {
            let history = ledger.transaction_history(&msisdn)?;
            if history.is_empty() {
                println!("{}", "No transactions recorded".yellow());
                return Ok(());
            }
            for tx in &history {
                println!(
                    "{}  {:>6} {:>10.2}  {:>10.2} -> {:<10.2} {}",
                    tx.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    tx.trans_type,
                    tx.amount,
                    tx.prev_balance,
                    tx.new_balance,
                    tx.remarks.dimmed()
                );
            }
        }
    }

    Ok(())
}

fn print_asset(asset: &Asset) {
    println!("MSISDN:   {}", asset.msisdn.bright_white());
    println!("Dealer:   {}", asset.dealer_id);
    println!("Balance:  {}", format!("{:.2}", asset.balance).bright_white());
    println!("Status:   {}", asset.status);
    println!("Last op:  {} {:.2}", asset.trans_type, asset.trans_amount);
    println!("Remarks:  {}", asset.remarks);
    println!("Created:  {}", asset.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Updated:  {}", asset.updated_at.format("%Y-%m-%d %H:%M:%S"));
}
