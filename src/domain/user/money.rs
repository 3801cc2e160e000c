//! Currency and monetary amounts recorded against a subscription.
//!
//! Amounts are integer minor units (cents). The subscription engine stores
//! them verbatim; sign and magnitude checks belong to whoever builds the
//! `Money` value.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Supported ISO-style currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Brl,
    Rmb,
}

impl Currency {
    /// Parses a three-letter code. Empty input falls back to USD.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(Currency::Usd);
        }
        if code.chars().count() != 3 {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("expected a 3-letter code, got '{}'", code),
            ));
        }

        match code.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "CAD" => Ok(Currency::Cad),
            "AUD" => Ok(Currency::Aud),
            "BRL" => Ok(Currency::Brl),
            "RMB" => Ok(Currency::Rmb),
            other => Err(ValidationError::invalid_format(
                "currency",
                format!("unsupported currency '{}'", other),
            )),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Brl => "BRL",
            Currency::Rmb => "RMB",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Builds a value from a major-unit amount such as `9.99`, rounding to the nearest cent.
    pub fn from_major(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// The amount in major units, for display.
    pub fn major(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.major(), self.currency)
    }
}

/// The most recent payment applied to a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub at: Timestamp,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_code_defaults_to_usd() {
        assert_eq!(Currency::parse(""), Ok(Currency::Usd));
        assert_eq!(Currency::parse("   "), Ok(Currency::Usd));
    }

    #[test]
    fn codes_are_case_insensitive_and_trimmed() {
        assert_eq!(Currency::parse("eur"), Ok(Currency::Eur));
        assert_eq!(Currency::parse(" gBp "), Ok(Currency::Gbp));
        assert_eq!(Currency::parse("RMB"), Ok(Currency::Rmb));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(Currency::parse("US").is_err());
        assert!(Currency::parse("USDT").is_err());
    }

    #[test]
    fn unsupported_code_is_rejected() {
        let err = Currency::parse("JPY").unwrap_err();
        assert_eq!(err.field(), "currency");
    }

    #[test]
    fn currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Cad).unwrap(), "\"CAD\"");
        let c: Currency = serde_json::from_str("\"BRL\"").unwrap();
        assert_eq!(c, Currency::Brl);
    }

    #[test]
    fn from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(9.99, Currency::Usd).amount_cents, 999);
        assert_eq!(Money::from_major(0.1 + 0.2, Currency::Usd).amount_cents, 30);
    }

    #[test]
    fn money_does_not_reject_negative_amounts() {
        let refund = Money::new(-500, Currency::Eur);
        assert_eq!(refund.major(), -5.0);
        assert_eq!(refund.to_string(), "-5.00 EUR");
    }
}
