//! Token amounts in base units

use primitive_types::U256;
use thiserror::Error;

/// Amount of value in base units (256-bit unsigned, never negative)
pub type Amount = U256;

/// Amount parsing and scaling error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Not a decimal or 0x-prefixed hex number
    #[error("invalid amount: {0:?}")]
    Invalid(String),
    /// Result does not fit in 256 bits
    #[error("amount overflows 256 bits")]
    Overflow,
}

/// Parse an amount from a decimal or `0x`-prefixed hex string.
///
/// Unlike node genesis parsing, an empty or malformed string is an error, never zero.
pub fn parse_amount(s: &str) -> Result<Amount, AmountError> {
    let s = s.trim();
    let invalid = || AmountError::Invalid(s.to_string());
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() {
            return Err(invalid());
        }
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(U256::zero());
        }
        if digits.len() > 64 {
            return Err(AmountError::Overflow);
        }
        return U256::from_str_radix(digits, 16).map_err(|_| invalid());
    }
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // Only digits remain, so the sole failure left is a value past 256 bits
    U256::from_dec_str(s).map_err(|_| AmountError::Overflow)
}

/// Scale a whole-token count to base units: `whole * 10^decimals`.
pub fn scale_units(whole: u64, decimals: u8) -> Result<Amount, AmountError> {
    let mut factor = U256::one();
    for _ in 0..decimals {
        factor = factor.checked_mul(U256::from(10u8)).ok_or(AmountError::Overflow)?;
    }
    factor
        .checked_mul(U256::from(whole))
        .ok_or(AmountError::Overflow)
}

/// Serde adapter writing amounts as decimal strings and reading decimal or hex strings.
///
/// Use with `#[serde(with = "kbx_primitives::serde_amount")]`.
#[cfg(feature = "serde")]
pub mod serde_amount {
    use super::{parse_amount, Amount};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as a decimal string
    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    /// Deserialize from a decimal or hex string
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_amount(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_amount("1000000000000000000").unwrap(), U256::from(10u64).pow(U256::from(18)));
        assert_eq!(parse_amount(" 42 ").unwrap(), U256::from(42u64));
        assert_eq!(parse_amount("0").unwrap(), U256::zero());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_amount("0xde0b6b3a7640000").unwrap(), U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(parse_amount("0X0a").unwrap(), U256::from(10u64));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_amount(""), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount("0x"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount("-5"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount("12ab"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount("0xzz"), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn test_parse_overflow() {
        let too_big = format!("0x1{}", "0".repeat(64));
        assert_eq!(parse_amount(&too_big), Err(AmountError::Overflow));
        let max = U256::MAX.to_string();
        assert_eq!(parse_amount(&max).unwrap(), U256::MAX);
        assert_eq!(parse_amount(&format!("{}0", max)), Err(AmountError::Overflow));
    }

    #[test]
    fn test_scale_units() {
        // 500,000,000 tokens at 18 decimals
        let supply = scale_units(500_000_000, 18).unwrap();
        assert_eq!(supply.to_string(), "500000000000000000000000000");
        assert_eq!(scale_units(10, 0).unwrap(), U256::from(10u64));
        assert_eq!(scale_units(0, 18).unwrap(), U256::zero());
    }

    #[test]
    fn test_scale_units_overflow() {
        assert_eq!(scale_units(1, 78), Err(AmountError::Overflow));
        assert_eq!(scale_units(u64::MAX, 77), Err(AmountError::Overflow));
    }
}
