//! Max command - the amount the MAX button inserts for a token

use anyhow::Result;
use swapguard_core::Token;

use super::get_context;
use crate::output;

pub fn run(token: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let wallet = &ctx.wallet_service;

    let symbol = Token::normalize_symbol(token);
    let max_amount = wallet.max_amount(&symbol);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "token": symbol,
                "balance": wallet.balance_of(token),
                "decimals": wallet.decimals_of(token),
                "max_amount": max_amount,
            })
        );
        return Ok(());
    }

    if wallet.balance_of(token) == 0.0 {
        output::warning(&format!("No {} balance", symbol));
    }
    println!("{}", max_amount);
    Ok(())
}
