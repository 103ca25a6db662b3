//! Ledger error types

use kbx_primitives::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a mutating operation is rejected.
///
/// A rejected operation never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger is paused
    #[error("ledger is paused")]
    Paused,

    /// Balance too low
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the operation needs
        required: Amount,
        /// Balance held
        available: Amount,
    },

    /// Allowance too low
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// Amount the operation needs
        required: Amount,
        /// Remaining allowance
        available: Amount,
    },

    /// Caller is not on the whitelist
    #[error("{0} is not whitelisted")]
    NotWhitelisted(Address),

    /// Caller is not the owner
    #[error("{0} is not the owner")]
    NotOwner(Address),

    /// Blacklisted sender moving value to a non-whitelisted recipient
    #[error("blacklisted {from} may only transfer to whitelisted accounts, {to} is not")]
    BlacklistRestricted {
        /// Blacklisted balance owner
        from: Address,
        /// Rejected recipient
        to: Address,
    },

    /// Removal would leave the whitelist empty
    #[error("cannot remove {0}: last whitelisted address")]
    LastWhitelistedAddress(Address),

    /// Arithmetic past 256 bits
    #[error("amount overflow")]
    Overflow,
}

impl LedgerError {
    /// The failure kind without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Paused => ErrorKind::Paused,
            LedgerError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            LedgerError::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
            LedgerError::NotWhitelisted(_) => ErrorKind::NotWhitelisted,
            LedgerError::NotOwner(_) => ErrorKind::NotOwner,
            LedgerError::BlacklistRestricted { .. } => ErrorKind::BlacklistRestricted,
            LedgerError::LastWhitelistedAddress(_) => ErrorKind::LastWhitelistedAddress,
            LedgerError::Overflow => ErrorKind::Overflow,
        }
    }
}

/// Fieldless failure kind, for matching and for scripted expectations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`LedgerError::Paused`]
    Paused,
    /// See [`LedgerError::InsufficientBalance`]
    InsufficientBalance,
    /// See [`LedgerError::InsufficientAllowance`]
    InsufficientAllowance,
    /// See [`LedgerError::NotWhitelisted`]
    NotWhitelisted,
    /// See [`LedgerError::NotOwner`]
    NotOwner,
    /// See [`LedgerError::BlacklistRestricted`]
    BlacklistRestricted,
    /// See [`LedgerError::LastWhitelistedAddress`]
    LastWhitelistedAddress,
    /// See [`LedgerError::Overflow`]
    Overflow,
}

impl ErrorKind {
    /// snake_case name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Paused => "paused",
            ErrorKind::InsufficientBalance => "insufficient_balance",
            ErrorKind::InsufficientAllowance => "insufficient_allowance",
            ErrorKind::NotWhitelisted => "not_whitelisted",
            ErrorKind::NotOwner => "not_owner",
            ErrorKind::BlacklistRestricted => "blacklist_restricted",
            ErrorKind::LastWhitelistedAddress => "last_whitelisted_address",
            ErrorKind::Overflow => "overflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// A broken ledger invariant. Reaching one of these is a bug in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Balances do not add up to the total supply
    #[error("balances sum to {sum}, total supply is {total_supply}")]
    SupplyMismatch {
        /// Sum of all balances (saturated at the 256-bit maximum)
        sum: Amount,
        /// Recorded total supply
        total_supply: Amount,
    },

    /// Whitelist has no members
    #[error("whitelist is empty")]
    EmptyWhitelist,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = LedgerError::InsufficientBalance {
            required: Amount::from(10u64),
            available: Amount::from(3u64),
        };
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
        assert_eq!(err.to_string(), "insufficient balance: required 10, available 3");
        assert_eq!(LedgerError::Paused.kind(), ErrorKind::Paused);
    }

    #[test]
    fn test_kind_serde_matches_as_str() {
        for kind in [
            ErrorKind::Paused,
            ErrorKind::InsufficientBalance,
            ErrorKind::InsufficientAllowance,
            ErrorKind::NotWhitelisted,
            ErrorKind::NotOwner,
            ErrorKind::BlacklistRestricted,
            ErrorKind::LastWhitelistedAddress,
            ErrorKind::Overflow,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
