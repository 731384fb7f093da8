//! Token domain model

use serde::{Deserialize, Serialize};

use super::precision::{DEFAULT_DECIMALS, MAX_PRECISION};

/// A swappable asset
/// Note: decimals is optional because price feeds rarely carry it.
/// An explicit 0 is kept as 0 (whole-unit tokens exist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
}

impl Token {
    /// Create a token with unknown name and decimals
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: Self::normalize_symbol(symbol),
            name: None,
            decimals: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Decimals to validate and format with
    pub fn decimals_or_default(&self) -> u32 {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }

    /// Normalize a ticker symbol to uppercase
    pub fn normalize_symbol(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    /// Validate token data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.symbol.trim().is_empty() {
            return Err("token symbol cannot be empty");
        }
        if self.decimals.is_some_and(|d| d > MAX_PRECISION) {
            return Err("token decimals cannot exceed 38");
        }
        Ok(())
    }
}
