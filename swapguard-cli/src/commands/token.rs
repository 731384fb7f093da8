//! Token command - manage token metadata, balances and prices

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use swapguard_core::config::Config;
use swapguard_core::Token;

use super::get_swapguard_dir;
use crate::output;

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Add or update a token
    Set {
        /// Token symbol (e.g. ETH)
        symbol: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Fractional digits the token supports
        #[arg(long)]
        decimals: Option<u32>,
        /// Available balance
        #[arg(long)]
        balance: Option<f64>,
        /// USD price
        #[arg(long)]
        price: Option<f64>,
    },
    /// Remove a token with its balance and price
    Remove {
        /// Token symbol
        symbol: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run(command: TokenCommands) -> Result<()> {
    let swapguard_dir = get_swapguard_dir()?;
    std::fs::create_dir_all(&swapguard_dir)?;
    let mut config = Config::load(&swapguard_dir)?;

    match command {
        TokenCommands::Set {
            symbol,
            name,
            decimals,
            balance,
            price,
        } => {
            let mut token = config.token(&symbol);
            if let Some(name) = name {
                token.name = Some(name);
            }
            if let Some(decimals) = decimals {
                token.decimals = Some(decimals);
            }
            token.validate().map_err(anyhow::Error::msg)?;
            if let Some(balance) = balance {
                if !balance.is_finite() || balance < 0.0 {
                    anyhow::bail!("Balance must be a non-negative number");
                }
                config.set_balance(&token.symbol, balance);
            }
            if let Some(price) = price {
                if !price.is_finite() || price < 0.0 {
                    anyhow::bail!("Price must be a non-negative number");
                }
                config.set_price(&token.symbol, price);
            }

            let symbol = token.symbol.clone();
            config.set_token(token);
            config.save(&swapguard_dir)?;
            output::success(&format!("Token {} saved", symbol));
        }
        TokenCommands::Remove { symbol, force } => {
            let symbol = Token::normalize_symbol(&symbol);
            if !config.symbols().contains(&symbol) {
                anyhow::bail!("Token '{}' not found", symbol);
            }

            if !force {
                println!(
                    "\n{}",
                    format!("This will remove {} with its balance and price.", symbol).yellow()
                );
                if !Confirm::new()
                    .with_prompt("Are you sure?")
                    .default(false)
                    .interact()?
                {
                    println!("{}\n", "Cancelled".dimmed());
                    return Ok(());
                }
            }

            config.remove_token(&symbol);
            config.save(&swapguard_dir)?;
            output::success(&format!("Token {} removed", symbol));
        }
    }

    Ok(())
}
