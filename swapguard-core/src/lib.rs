//! SwapGuard Core - precision-safe amount logic for token swaps
//!
//! - **domain**: amount parsing, exact decimal comparison, max-amount
//!   formatting, display helpers (pure, no I/O)
//! - **services**: wallet lookups, quotes, swap form validation, event log
//! - **config**: settings.json with tokens, balances and prices

pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    check_amount, compare_decimals, format_max_amount, is_amount_valid, is_max_amount,
    parse_number, AmountCheck, AmountInput, CheckStrategy, Token, DEFAULT_DECIMALS,
};
pub use services::{EntryPoint, LogEntry, LogEvent, LoggingService};

/// Main context for SwapGuard operations
///
/// Holds the loaded configuration and the services built on it.
pub struct SwapGuardContext {
    pub config: Arc<Config>,
    pub wallet_service: WalletService,
    pub quote_service: QuoteService,
    pub swap_form_service: SwapFormService,
}

impl SwapGuardContext {
    /// Create a context from the settings in `swapguard_dir`
    pub fn new(swapguard_dir: &Path) -> Result<Self> {
        let config = Config::load(swapguard_dir)?;
        Ok(Self::from_config(config))
    }

    /// Create a context from an already loaded configuration
    pub fn from_config(config: Config) -> Self {
        let config = Arc::new(config);

        let wallet_service = WalletService::new(Arc::clone(&config));
        let quote_service = QuoteService::new(Arc::clone(&config));
        let swap_form_service = SwapFormService::new(wallet_service.clone());

        Self {
            config,
            wallet_service,
            quote_service,
            swap_form_service,
        }
    }
}
