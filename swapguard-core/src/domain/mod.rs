//! Core domain logic
//!
//! Pure data structures and amount arithmetic - no I/O or external
//! dependencies. Everything here is safe to call on every keystroke.

pub mod formatting;
pub mod precision;
pub mod result;
mod token;

pub use precision::{
    check_amount, compare_decimals, compare_decimals_at, format_max_amount, is_amount_valid,
    is_max_amount, number_to_string, parse_number, AmountCheck, AmountInput, CheckStrategy,
    DEFAULT_DECIMALS, MAX_PRECISION,
};
pub use token::Token;
