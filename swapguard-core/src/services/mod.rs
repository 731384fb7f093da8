//! Service layer - business logic orchestration
//!
//! Services combine the pure domain functions with configured balances,
//! prices and token metadata.

pub mod logging;
mod quote;
mod swap_form;
mod wallet;

pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use quote::{calculate_exchange_amount, calculate_price_impact, QuoteService, SwapQuote};
pub use swap_form::{FieldError, FormField, SwapForm, SwapFormService};
pub use wallet::{TokenHolding, WalletService};
