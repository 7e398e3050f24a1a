//! Type-safe price representation using decimal arithmetic.
//!
//! Currency amounts never touch binary floating point: arithmetic happens on
//! [`Decimal`] and display formatting always carries exactly two decimal
//! places, which is also the wire format the payment provider expects.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Round to two decimal places, half-up (midpoint away from zero).
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency_code: self.currency_code,
        }
    }

    /// Format the amount as a string-safe decimal with exactly two decimal
    /// places (e.g., `"24.98"`), without a currency symbol.
    #[must_use]
    pub fn amount_string(&self) -> String {
        format!("{:.2}", self.rounded().amount)
    }

    /// Format for display (e.g., `"24.98 €"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.amount_string(), self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Eur,
    Usd,
    Gbp,
}

impl CurrencyCode {
    /// The ISO 4217 code as sent to the payment provider.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_string_pads_to_two_decimals() {
        let price = Price::new(Decimal::new(40, 0), CurrencyCode::Eur);
        assert_eq!(price.amount_string(), "40.00");
    }

    #[test]
    fn amount_string_rounds_half_up() {
        let price = Price::new(Decimal::new(1005, 3), CurrencyCode::Eur);
        assert_eq!(price.amount_string(), "1.01");

        let price = Price::new(Decimal::new(1004, 3), CurrencyCode::Eur);
        assert_eq!(price.amount_string(), "1.00");
    }

    #[test]
    fn display_appends_symbol() {
        let price = Price::new(Decimal::new(2498, 2), CurrencyCode::Eur);
        assert_eq!(price.display(), "24.98 €");
    }

    #[test]
    fn currency_codes() {
        assert_eq!(CurrencyCode::Eur.code(), "EUR");
        assert_eq!(CurrencyCode::default(), CurrencyCode::Eur);
    }
}
