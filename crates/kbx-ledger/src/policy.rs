//! Allowance decrease policy

use serde::{Deserialize, Serialize};

/// What `decrease_approval` does when the delta exceeds the current allowance.
///
/// Fixed at genesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPolicy {
    /// Floor the allowance at zero
    #[default]
    Clamp,
    /// Reject with `InsufficientAllowance`
    Strict,
}
