//! Wallet service - per-token balances, decimals and max amounts

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::{check_amount, format_max_amount, is_max_amount, AmountCheck, Token};

/// One row of the wallet view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub symbol: String,
    pub name: Option<String>,
    pub decimals: u32,
    pub balance: f64,
    pub max_amount: String,
    pub price: Option<f64>,
    pub usd_value: Option<f64>,
}

/// Wallet service for balance lookups
#[derive(Clone)]
pub struct WalletService {
    config: Arc<Config>,
}

impl WalletService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Balance for a symbol, 0 when unknown
    pub fn balance_of(&self, symbol: &str) -> f64 {
        self.config
            .balances
            .get(&Token::normalize_symbol(symbol))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn decimals_of(&self, symbol: &str) -> u32 {
        self.config.decimals_of(symbol)
    }

    /// Amount string for the MAX button, honouring the token's decimals
    pub fn max_amount(&self, symbol: &str) -> String {
        format_max_amount(self.balance_of(symbol), self.decimals_of(symbol))
    }

    /// Whether `amount` is exactly what the MAX button would have produced
    pub fn is_max(&self, symbol: &str, amount: &str) -> bool {
        amount == self.max_amount(symbol) || is_max_amount(amount, self.balance_of(symbol))
    }

    /// Check `amount` against the symbol's balance
    pub fn check(&self, symbol: &str, amount: &str) -> AmountCheck {
        check_amount(amount, self.balance_of(symbol), self.decimals_of(symbol))
    }

    /// Known tokens, sorted by symbol
    pub fn tokens(&self) -> Vec<Token> {
        self.config
            .symbols()
            .iter()
            .map(|symbol| self.config.token(symbol))
            .collect()
    }

    /// All known tokens with their balances, sorted by symbol
    pub fn holdings(&self) -> Vec<TokenHolding> {
        self.config
            .symbols()
            .into_iter()
            .map(|symbol| {
                let token = self.config.token(&symbol);
                let balance = self.balance_of(&symbol);
                let price = self.config.prices.get(&symbol).copied();
                TokenHolding {
                    name: token.name,
                    decimals: self.decimals_of(&symbol),
                    balance,
                    max_amount: self.max_amount(&symbol),
                    price,
                    usd_value: price.map(|p| p * balance),
                    symbol,
                }
            })
            .collect()
    }
}
