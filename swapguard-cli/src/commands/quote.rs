//! Quote command - exchange rate, output amount and price impact

use anyhow::Result;
use colored::Colorize;
use rust_decimal::prelude::ToPrimitive;
use swapguard_core::domain::formatting::{format_number, format_percentage};
use swapguard_core::Token;

use super::get_context;
use crate::output::create_table;

pub fn run(amount: &str, from: &str, to: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let quote = ctx.quote_service.quote(from, to, amount);

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let from = Token::normalize_symbol(from);
    let to = Token::normalize_symbol(to);

    if quote.exchange_rate.is_zero() {
        println!(
            "{}",
            format!("No price available for {} → {}", from, to).yellow()
        );
        return Ok(());
    }

    let rate = quote.exchange_rate.to_f64().unwrap_or_default();
    let impact = quote.price_impact.to_f64().unwrap_or_default() / 100.0;

    let mut table = create_table();
    table.add_row(vec!["You pay".to_string(), format!("{} {}", amount, from)]);
    table.add_row(vec!["You receive".to_string(), format!("{} {}", quote.to_amount, to)]);
    table.add_row(vec![
        "Rate".to_string(),
        format!("1 {} = {} {}", from, format_number(rate, None), to),
    ]);
    table.add_row(vec!["Price impact".to_string(), format_percentage(impact, 2)]);

    println!("{}", table);
    Ok(())
}
