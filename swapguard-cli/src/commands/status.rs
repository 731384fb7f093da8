//! Status command - wallet balances and max amounts

use anyhow::Result;
use colored::Colorize;
use swapguard_core::domain::formatting::{format_large_number, format_number, format_usd};

use super::get_context;
use crate::output::create_table;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let holdings = ctx.wallet_service.holdings();

    if json {
        println!("{}", serde_json::to_string_pretty(&holdings)?);
        return Ok(());
    }

    println!("{}", "Wallet".bold());
    println!();

    if holdings.is_empty() {
        println!("{}", "No tokens configured. Add one with 'swg token set'.".dimmed());
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Token", "Name", "Decimals", "Balance", "Max", "Price", "Value"]);

    let mut total = 0.0;
    for holding in &holdings {
        total += holding.usd_value.unwrap_or(0.0);
        table.add_row(vec![
            holding.symbol.clone(),
            holding.name.clone().unwrap_or_default(),
            holding.decimals.to_string(),
            format_number(holding.balance, None),
            holding.max_amount.clone(),
            holding.price.map(format_usd).unwrap_or_else(|| "-".to_string()),
            holding
                .usd_value
                .map(|v| format!("${}", format_large_number(v)))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{}", table);
    println!();
    println!("Total value: {}", format_usd(total).bold());
    Ok(())
}
