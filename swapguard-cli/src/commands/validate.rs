//! Validate command - can this amount be spent from the token balance?

use anyhow::Result;
use colored::Colorize;
use swapguard_core::domain::parse_number;
use swapguard_core::{LogEvent, Token};

use super::{arg_or_stdin, get_context, get_logger, log_event};

pub fn run(amount: Option<String>, token: &str, json: bool) -> Result<()> {
    let amount = arg_or_stdin(amount, "amount")?;
    let token = Token::normalize_symbol(token);
    let token = token.as_str();
    let ctx = get_context()?;
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("validate"));

    let wallet = &ctx.wallet_service;
    let check = wallet.check(token, &amount);
    let numeric = parse_number(amount.as_str());
    let is_max = wallet.is_max(token, &amount);

    if let Some(event) = LogEvent::from_check(token, &check) {
        log_event(&logger, event.with_command("validate"));
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "token": token,
                "amount": amount,
                "parsed": if numeric.is_finite() { Some(numeric) } else { None },
                "balance": wallet.balance_of(token),
                "decimals": wallet.decimals_of(token),
                "valid": check.valid,
                "is_max": is_max,
                "strategy": check.strategy,
            })
        );
        return Ok(());
    }

    if numeric.is_nan() {
        anyhow::bail!("'{}' is not a number", amount);
    }

    if check.valid {
        let suffix = if is_max { " (MAX)".cyan().to_string() } else { String::new() };
        println!(
            "{} {} {} can be spent{}",
            "✓".green(),
            amount,
            token,
            suffix
        );
        if check.used_fallback() {
            println!("{}", "Checked numerically; amount is not a plain decimal".dimmed());
        }
        Ok(())
    } else {
        anyhow::bail!(
            "Insufficient balance: {} {} available",
            wallet.max_amount(token),
            token
        )
    }
}
