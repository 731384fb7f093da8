//! Swap form service - decides whether a swap may be submitted

use serde::{Deserialize, Serialize};

use super::wallet::WalletService;
use crate::domain::{is_amount_valid, parse_number, Token};

/// The swap form as the user filled it in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapForm {
    pub from_token: String,
    pub to_token: String,
    pub from_amount: String,
}

impl SwapForm {
    pub fn new(
        from_token: impl Into<String>,
        to_token: impl Into<String>,
        from_amount: impl Into<String>,
    ) -> Self {
        Self {
            from_token: from_token.into(),
            to_token: to_token.into(),
            from_amount: from_amount.into(),
        }
    }

    /// Swap direction flipped, with the quoted output becoming the new input
    ///
    /// Unchanged until both tokens are selected.
    pub fn flipped(&self, to_amount: &str) -> Self {
        if self.from_token.is_empty() || self.to_token.is_empty() {
            return self.clone();
        }
        Self {
            from_token: self.to_token.clone(),
            to_token: self.from_token.clone(),
            from_amount: to_amount.to_string(),
        }
    }

    /// Fill the amount with the full balance of `from_token`
    ///
    /// Unchanged when no token is selected or its balance is zero.
    pub fn with_max_amount(mut self, wallet: &WalletService) -> Self {
        if !self.from_token.is_empty() && wallet.balance_of(&self.from_token) != 0.0 {
            self.from_amount = wallet.max_amount(&self.from_token);
        }
        self
    }
}

/// Field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FromToken,
    ToToken,
    FromAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Swap form validation against the wallet
pub struct SwapFormService {
    wallet: WalletService,
}

impl SwapFormService {
    pub fn new(wallet: WalletService) -> Self {
        Self { wallet }
    }

    /// Validate the form, returning every problem found
    ///
    /// Field checks run first; the same-token and balance checks only run
    /// once every field is individually acceptable.
    pub fn validate(&self, form: &SwapForm) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if form.from_token.trim().is_empty() {
            errors.push(FieldError::new(
                FormField::FromToken,
                "Please select a token to swap from",
            ));
        }
        if form.to_token.trim().is_empty() {
            errors.push(FieldError::new(
                FormField::ToToken,
                "Please select a token to swap to",
            ));
        }
        if form.from_amount.is_empty() {
            errors.push(FieldError::new(FormField::FromAmount, "Please enter an amount"));
        } else {
            let amount = parse_number(form.from_amount.as_str());
            if amount.is_nan() || amount <= 0.0 {
                errors.push(FieldError::new(
                    FormField::FromAmount,
                    "Amount must be a positive number",
                ));
            }
        }

        if !errors.is_empty() {
            return errors;
        }

        if Token::normalize_symbol(&form.from_token) == Token::normalize_symbol(&form.to_token) {
            errors.push(FieldError::new(
                FormField::ToToken,
                "Cannot swap to the same token",
            ));
        }

        let balance = self.wallet.balance_of(&form.from_token);
        let decimals = self.wallet.decimals_of(&form.from_token);
        if !is_amount_valid(form.from_amount.as_str(), balance, decimals) {
            errors.push(FieldError::new(FormField::FromAmount, "Insufficient balance"));
        }

        errors
    }

    pub fn is_valid(&self, form: &SwapForm) -> bool {
        self.validate(form).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;

    fn service() -> SwapFormService {
        let mut config = Config::default();
        config.set_balance("ETH", 10.0);
        config.set_balance("USDC", 5000.0);
        SwapFormService::new(WalletService::new(Arc::new(config)))
    }

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_valid_form() {
        let service = service();
        assert!(service.is_valid(&SwapForm::new("ETH", "USDC", "10")));
        assert!(service.is_valid(&SwapForm::new("ETH", "USDC", "0.5")));
    }

    #[test]
    fn test_required_fields() {
        let errors = service().validate(&SwapForm::default());
        assert_eq!(
            messages(&errors),
            vec![
                "Please select a token to swap from",
                "Please select a token to swap to",
                "Please enter an amount",
            ]
        );
    }

    #[test]
    fn test_amount_must_be_positive() {
        let service = service();
        for amount in ["0", "-1", "abc"] {
            let errors = service.validate(&SwapForm::new("ETH", "USDC", amount));
            assert_eq!(errors.len(), 1, "amount {:?}", amount);
            assert_eq!(errors[0].field, FormField::FromAmount);
            assert_eq!(errors[0].message, "Amount must be a positive number");
        }
    }

    #[test]
    fn test_same_token() {
        let errors = service().validate(&SwapForm::new("ETH", "eth", "1"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FormField::ToToken);
        assert_eq!(errors[0].message, "Cannot swap to the same token");
    }

    #[test]
    fn test_insufficient_balance() {
        let errors = service().validate(&SwapForm::new("ETH", "USDC", "10.01"));
        assert_eq!(messages(&errors), vec!["Insufficient balance"]);

        let errors = service().validate(&SwapForm::new("DAI", "USDC", "1"));
        assert_eq!(messages(&errors), vec!["Insufficient balance"]);
    }

    #[test]
    fn test_flipped() {
        let form = SwapForm::new("ETH", "USDC", "1").flipped("2000");
        assert_eq!(form, SwapForm::new("USDC", "ETH", "2000"));

        let incomplete = SwapForm::new("ETH", "", "1");
        assert_eq!(incomplete.flipped("2000"), incomplete);
    }

    #[test]
    fn test_with_max_amount() {
        let mut config = Config::default();
        config.set_balance("ETH", 123.45);
        let wallet = WalletService::new(Arc::new(config));

        let form = SwapForm::new("ETH", "USDC", "").with_max_amount(&wallet);
        assert_eq!(form.from_amount, "123.45");

        let form = SwapForm::new("DAI", "USDC", "7").with_max_amount(&wallet);
        assert_eq!(form.from_amount, "7");
    }
}
