//! Quote service - exchange rate, output amount and price impact

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::Token;

/// Quoted outcome of swapping `from_amount`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub exchange_rate: Decimal,
    pub to_amount: String,
    /// Percentage, capped at 5
    pub price_impact: Decimal,
}

impl SwapQuote {
    /// Quote shown while the form is incomplete
    pub fn zero() -> Self {
        Self {
            exchange_rate: Decimal::ZERO,
            to_amount: "0".to_string(),
            price_impact: Decimal::ZERO,
        }
    }
}

/// Quote service over the configured price table
#[derive(Clone)]
pub struct QuoteService {
    config: Arc<Config>,
}

impl QuoteService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn price(&self, symbol: &str) -> Option<Decimal> {
        self.config
            .prices
            .get(&Token::normalize_symbol(symbol))
            .and_then(|price| Decimal::from_f64(*price))
    }

    /// How many `to` units one `from` unit buys; zero when either price is unknown
    pub fn exchange_rate(&self, from_token: &str, to_token: &str) -> Decimal {
        match (self.price(from_token), self.price(to_token)) {
            (Some(from), Some(to)) if !to.is_zero() => {
                from.checked_div(to).unwrap_or(Decimal::ZERO)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Quote a swap; incomplete or non-numeric input yields [`SwapQuote::zero`]
    pub fn quote(&self, from_token: &str, to_token: &str, from_amount: &str) -> SwapQuote {
        if from_token.trim().is_empty() || to_token.trim().is_empty() {
            return SwapQuote::zero();
        }
        let Some(amount) = parse_decimal(from_amount) else {
            return SwapQuote::zero();
        };

        let rate = self.exchange_rate(from_token, to_token);
        let to_amount = calculate_exchange_amount(amount, rate)
            .round_dp_with_strategy(self.config.decimals_of(to_token), RoundingStrategy::ToZero)
            .normalize();

        // Flat 0.1% of the input, capped at 5%
        let price_impact = (amount * Decimal::new(1, 3))
            .min(Decimal::new(5, 0))
            .max(Decimal::ZERO);

        SwapQuote {
            exchange_rate: rate,
            to_amount: to_amount.to_string(),
            price_impact,
        }
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// `input × rate`, zero when either side is zero or the product overflows
pub fn calculate_exchange_amount(input: Decimal, rate: Decimal) -> Decimal {
    if input.is_zero() || rate.is_zero() {
        return Decimal::ZERO;
    }
    input.checked_mul(rate).unwrap_or(Decimal::ZERO)
}

/// Deviation of `output` from `input × market_rate`, as an absolute percentage
pub fn calculate_price_impact(input: Decimal, output: Decimal, market_rate: Decimal) -> Decimal {
    if input.is_zero() || output.is_zero() || market_rate.is_zero() {
        return Decimal::ZERO;
    }

    let Some(expected) = input.checked_mul(market_rate) else {
        return Decimal::ZERO;
    };
    ((expected - output) / expected * Decimal::ONE_HUNDRED).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> QuoteService {
        let mut config = Config::default();
        config.set_token(Token::new("USDC").with_decimals(6));
        config.set_price("ETH", 2000.0);
        config.set_price("USDC", 1.0);
        config.set_price("BTC", 3.0);
        config.set_price("DEAD", 0.0);
        QuoteService::new(Arc::new(config))
    }

    #[test]
    fn test_exchange_rate() {
        let service = service();
        assert_eq!(service.exchange_rate("ETH", "USDC"), Decimal::from(2000));
        assert_eq!(service.exchange_rate("usdc", "eth"), Decimal::from_str("0.0005").unwrap());
        assert_eq!(service.exchange_rate("ETH", "DEAD"), Decimal::ZERO);
        assert_eq!(service.exchange_rate("ETH", "NOPE"), Decimal::ZERO);
    }

    #[test]
    fn test_quote() {
        let quote = service().quote("ETH", "USDC", "1.5");
        assert_eq!(quote.to_amount, "3000");
        assert_eq!(quote.price_impact, Decimal::from_str("0.0015").unwrap());

        let quote = service().quote("USDC", "ETH", "100");
        assert_eq!(quote.to_amount, "0.05");
        assert_eq!(quote.price_impact, Decimal::from_str("0.1").unwrap());
    }

    #[test]
    fn test_quote_truncates_to_target_decimals() {
        let quote = service().quote("USDC", "BTC", "1");
        assert_eq!(quote.to_amount, "0.333333333333333333");

        let quote = service().quote("BTC", "USDC", "0.1234567");
        assert_eq!(quote.to_amount, "0.37037");
    }

    #[test]
    fn test_quote_caps_price_impact() {
        let quote = service().quote("USDC", "ETH", "100000");
        assert_eq!(quote.price_impact, Decimal::from(5));
    }

    #[test]
    fn test_quote_incomplete_input() {
        let service = service();
        assert_eq!(service.quote("", "USDC", "1"), SwapQuote::zero());
        assert_eq!(service.quote("ETH", "USDC", ""), SwapQuote::zero());
        assert_eq!(service.quote("ETH", "USDC", "abc"), SwapQuote::zero());
    }

    #[test]
    fn test_quote_scientific_amount() {
        let quote = service().quote("ETH", "USDC", "1e-3");
        assert_eq!(quote.to_amount, "2");
    }

    #[test]
    fn test_calculate_price_impact() {
        let impact = calculate_price_impact(Decimal::from(10), Decimal::from(19), Decimal::from(2));
        assert_eq!(impact, Decimal::from(5));
        assert_eq!(
            calculate_price_impact(Decimal::ZERO, Decimal::from(19), Decimal::from(2)),
            Decimal::ZERO
        );
    }
}
