//! Common error types for primitives

use crate::address::AddressError;
use crate::amount::AmountError;
use thiserror::Error;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Amount error
    #[error("amount error: {0}")]
    Amount(#[from] AmountError),
}
