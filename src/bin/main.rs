#![forbid(unsafe_code)]

use colored::*;

fn main() {
    println!("{}", "Airledger CLI".bright_cyan().bold());
    println!("{}", "-------------".bright_cyan());
    println!();
    println!(
        "{}",
        "This is the main entry point, but the functionality is in separate binaries.".yellow()
    );
    println!(
        "{}",
        "Use 'cargo run --bin <binary_name>' to run a specific command.".yellow()
    );
    println!();
    println!("{}", "Available binaries:".bright_green().underline());
    println!("  - {}", "air-ledger".bright_white());
    println!("  - {}", "air-balance".bright_white());
    println!("  - {}", "air-history".bright_white());
    println!();
    println!("{}", "Example:".bright_green().underline());
    println!("{}", "  cargo run --bin air-ledger -- seed".italic());
}
