#![forbid(unsafe_code)]
//! View transaction history for an asset - Beautiful edition!

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use airledger::asset::{TRANS_CREATE, TRANS_CREDIT, TRANS_DEBIT};
use airledger::cli::open_ledger_from_config;

const LOGO: &str = r#"
╔═══════════════════════════════════════════════╗
║      📡  AIRLEDGER · Transaction History      ║
╚═══════════════════════════════════════════════╝
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", LOGO.bright_magenta());

    let msisdn = std::env::args()
        .nth(1)
        .ok_or("usage: air-history <msisdn>")?;

    let (_config, ledger) = open_ledger_from_config()?;
    let transactions = ledger.transaction_history(&msisdn)?;

    println!("{}", format!("📍 MSISDN: {}", msisdn).cyan());
    println!();

    if transactions.is_empty() {
        println!(
            "{}",
            "╔══════════════════════════════════════════════════════════╗".yellow()
        );
        println!(
            "{}",
            "║              📭 No Transactions Found                    ║".yellow()
        );
        println!(
            "{}",
            "╚══════════════════════════════════════════════════════════╝".yellow()
        );
        println!();
        return Ok(());
    }

    let mut credit_count = 0;
    let mut debit_count = 0;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Type")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Amount")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Balance")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Remarks")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Date")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

    // Newest first
    for tx in transactions.iter().rev() {
        let (label, color) = match tx.trans_type.as_str() {
            TRANS_CREDIT => {
                credit_count += 1;
                ("📥 Credit", TableColor::Green)
            }
            TRANS_DEBIT => {
                debit_count += 1;
                ("📤 Debit", TableColor::Red)
            }
            TRANS_CREATE => ("✨ Create", TableColor::Cyan),
            _ => ("Other", TableColor::White),
        };

        let remarks = if tx.remarks.len() > 24 {
            format!("{}...", &tx.remarks[..21])
        } else {
            tx.remarks.clone()
        };

        table.add_row(vec![
            Cell::new(label).fg(color),
            Cell::new(format!("{:.2}", tx.amount)).fg(color),
            Cell::new(format!("{:.2} → {:.2}", tx.prev_balance, tx.new_balance))
                .fg(TableColor::White),
            Cell::new(remarks).fg(TableColor::Grey),
            Cell::new(tx.timestamp.format("%m/%d %H:%M").to_string()).fg(TableColor::Grey),
        ]);
    }

    println!("{}", table);
    println!();

    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════╗".bright_blue()
    );
    println!(
        "{}",
        "║                    📊 HISTORY SUMMARY                    ║"
            .bright_blue()
            .bold()
    );
    println!(
        "{}",
        "╠══════════════════════════════════════════════════════════╣".bright_blue()
    );
    println!(
        "{}",
        format!("║  📝 Total Transactions: {:<33}║", transactions.len()).blue()
    );
    println!(
        "{}",
        format!("║  📥 Credits: {:<44}║", credit_count).green()
    );
    println!("{}", format!("║  📤 Debits: {:<45}║", debit_count).red());
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════╝".bright_blue()
    );
    println!();

    Ok(())
}
