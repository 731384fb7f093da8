//! Configuration management
//!
//! Token metadata, balances and prices live in `settings.json`:
//! ```json
//! {
//!   "tokens": { "USDC": { "name": "USD Coin", "decimals": 6 } },
//!   "balances": { "USDC": 5000, "ETH": 10.5 },
//!   "prices": { "USDC": 1.0, "ETH": 1645.93 },
//!   "defaultDecimals": 18
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::{Token, DEFAULT_DECIMALS, MAX_PRECISION};

/// Environment variable overriding `defaultDecimals`
pub const DEFAULT_DECIMALS_ENV: &str = "SWAPGUARD_DEFAULT_DECIMALS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    tokens: BTreeMap<String, TokenSettings>,
    #[serde(default)]
    balances: BTreeMap<String, f64>,
    #[serde(default)]
    prices: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_decimals: Option<u32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TokenSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decimals: Option<u32>,
}

/// SwapGuard configuration (normalized view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Token metadata keyed by uppercase symbol
    pub tokens: BTreeMap<String, Token>,
    pub balances: BTreeMap<String, f64>,
    pub prices: BTreeMap<String, f64>,
    /// Decimals for tokens that do not declare any
    pub default_decimals: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokens: BTreeMap::new(),
            balances: BTreeMap::new(),
            prices: BTreeMap::new(),
            default_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Config {
    /// Load config from the swapguard directory
    ///
    /// Default decimals can be set via:
    /// 1. Settings file (`defaultDecimals`)
    /// 2. Environment variable SWAPGUARD_DEFAULT_DECIMALS (wins over the file)
    pub fn load(swapguard_dir: &Path) -> Result<Self> {
        let raw = read_settings(&swapguard_dir.join("settings.json"))?;
        let env_override = std::env::var(DEFAULT_DECIMALS_ENV).ok();
        Ok(Self::from_settings(raw, env_override.as_deref()))
    }

    fn from_settings(raw: SettingsFile, decimals_override: Option<&str>) -> Self {
        let default_decimals = parse_decimals_override(decimals_override)
            .or(raw.default_decimals.and_then(|d| bounded_decimals("defaultDecimals", d)))
            .unwrap_or(DEFAULT_DECIMALS);

        let tokens = raw
            .tokens
            .into_iter()
            .map(|(symbol, settings)| {
                let mut token = Token::new(&symbol);
                token.name = settings.name;
                token.decimals = settings
                    .decimals
                    .and_then(|d| bounded_decimals(&symbol, d));
                (token.symbol.clone(), token)
            })
            .collect();

        Self {
            tokens,
            balances: normalize_keys(raw.balances),
            prices: normalize_keys(raw.prices),
            default_decimals,
        }
    }

    /// Save config to the swapguard directory
    /// Preserves other settings that SwapGuard doesn't manage
    pub fn save(&self, swapguard_dir: &Path) -> Result<()> {
        let settings_path = swapguard_dir.join("settings.json");
        let mut settings = read_settings(&settings_path)?;

        settings.tokens = self
            .tokens
            .values()
            .map(|token| {
                (
                    token.symbol.clone(),
                    TokenSettings {
                        name: token.name.clone(),
                        decimals: token.decimals,
                    },
                )
            })
            .collect();
        settings.balances = self.balances.clone();
        settings.prices = self.prices.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write settings: {:?}", settings_path))?;
        Ok(())
    }

    /// Token metadata, falling back to a bare token for unknown symbols
    pub fn token(&self, symbol: &str) -> Token {
        let symbol = Token::normalize_symbol(symbol);
        self.tokens
            .get(&symbol)
            .cloned()
            .unwrap_or_else(|| Token::new(&symbol))
    }

    /// Decimals for a symbol, using `default_decimals` when the token declares none
    pub fn decimals_of(&self, symbol: &str) -> u32 {
        self.token(symbol).decimals.unwrap_or(self.default_decimals)
    }

    /// Every symbol mentioned in tokens, balances or prices, sorted
    pub fn symbols(&self) -> Vec<String> {
        self.tokens
            .keys()
            .chain(self.balances.keys())
            .chain(self.prices.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Insert or replace token metadata
    pub fn set_token(&mut self, token: Token) {
        self.tokens.insert(token.symbol.clone(), token);
    }

    pub fn set_balance(&mut self, symbol: &str, balance: f64) {
        self.balances.insert(Token::normalize_symbol(symbol), balance);
    }

    pub fn set_price(&mut self, symbol: &str, price: f64) {
        self.prices.insert(Token::normalize_symbol(symbol), price);
    }

    /// Remove a token with its balance and price; returns false if it was unknown
    pub fn remove_token(&mut self, symbol: &str) -> bool {
        let symbol = Token::normalize_symbol(symbol);
        let had_token = self.tokens.remove(&symbol).is_some();
        let had_balance = self.balances.remove(&symbol).is_some();
        let had_price = self.prices.remove(&symbol).is_some();
        had_token || had_balance || had_price
    }
}

fn read_settings(settings_path: &Path) -> Result<SettingsFile> {
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(settings_path)
        .with_context(|| format!("Failed to read settings: {:?}", settings_path))?;

    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("Ignoring malformed {:?}: {}", settings_path, e);
        SettingsFile::default()
    }))
}

fn normalize_keys(map: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    map.into_iter()
        .map(|(symbol, value)| (Token::normalize_symbol(&symbol), value))
        .collect()
}

fn parse_decimals_override(value: Option<&str>) -> Option<u32> {
    let value = value?.trim();
    match value.parse() {
        Ok(decimals) => bounded_decimals(DEFAULT_DECIMALS_ENV, decimals),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", DEFAULT_DECIMALS_ENV, value);
            None
        }
    }
}

fn bounded_decimals(source: &str, decimals: u32) -> Option<u32> {
    if decimals > MAX_PRECISION {
        warn!(
            "Ignoring {} decimals for {}: at most {} are supported",
            decimals, source, MAX_PRECISION
        );
        return None;
    }
    Some(decimals)
}
