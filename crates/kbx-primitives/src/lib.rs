//! # kbx-primitives
//!
//! Primitive types for the KBX ledger.
//!
//! This crate provides the account identifier and the amount type shared by
//! the engine and its tooling.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod amount;
mod error;

pub use address::{Address, AddressError};
pub use amount::{parse_amount, scale_units, Amount, AmountError};
pub use error::PrimitiveError;

#[cfg(feature = "serde")]
pub use amount::serde_amount;

/// Token decimals type
pub type Decimals = u8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_error_wraps_both_sources() {
        let err: PrimitiveError = Address::from_hex("0x12").unwrap_err().into();
        assert!(matches!(err, PrimitiveError::Address(_)));

        let err: PrimitiveError = parse_amount("ten").unwrap_err().into();
        assert!(err.to_string().starts_with("amount error:"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_amount_field() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Entry {
            #[serde(with = "serde_amount")]
            amount: Amount,
        }

        let entry = Entry { amount: scale_units(3, 18).unwrap() };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"amount":"3000000000000000000"}"#);
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry);

        let hex: Entry = serde_json::from_str(r#"{"amount":"0x29a2241af62c0000"}"#).unwrap();
        assert_eq!(hex, entry);
        assert!(serde_json::from_str::<Entry>(r#"{"amount":"-1"}"#).is_err());
    }
}
