//! Serializable operation envelope

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use kbx_primitives::{serde_amount, Address, Amount};
use serde::{Deserialize, Serialize};

/// A mutating ledger operation together with the already-authenticated caller.
///
/// JSON form is tagged by `op`, e.g.
/// `{"op":"transfer","caller":"0x..","to":"0x..","amount":"10"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// [`Ledger::transfer`]
    Transfer {
        /// Sender
        caller: Address,
        /// Recipient
        to: Address,
        /// Base units to move
        #[serde(with = "serde_amount")]
        amount: Amount,
    },
    /// [`Ledger::approve`]
    Approve {
        /// Balance owner
        caller: Address,
        /// Delegate
        spender: Address,
        /// New allowance
        #[serde(with = "serde_amount")]
        amount: Amount,
    },
    /// [`Ledger::increase_approval`]
    IncreaseApproval {
        /// Balance owner
        caller: Address,
        /// Delegate
        spender: Address,
        /// Increment
        #[serde(with = "serde_amount")]
        delta: Amount,
    },
    /// [`Ledger::decrease_approval`]
    DecreaseApproval {
        /// Balance owner
        caller: Address,
        /// Delegate
        spender: Address,
        /// Decrement
        #[serde(with = "serde_amount")]
        delta: Amount,
    },
    /// [`Ledger::transfer_from`]
    TransferFrom {
        /// Spender
        caller: Address,
        /// Balance owner
        from: Address,
        /// Recipient
        to: Address,
        /// Base units to move
        #[serde(with = "serde_amount")]
        amount: Amount,
    },
    /// [`Ledger::burn`]
    Burn {
        /// Whitelisted holder
        caller: Address,
        /// Base units to destroy
        #[serde(with = "serde_amount")]
        amount: Amount,
    },
    /// [`Ledger::add_address_to_whitelist`]
    AddAddressToWhitelist {
        /// Whitelisted admin
        caller: Address,
        /// Account to add
        target: Address,
    },
    /// [`Ledger::remove_address_from_whitelist`]
    RemoveAddressFromWhitelist {
        /// Whitelisted admin
        caller: Address,
        /// Account to remove
        target: Address,
    },
    /// [`Ledger::add_address_to_blacklist`]
    AddAddressToBlacklist {
        /// Whitelisted admin
        caller: Address,
        /// Account to add
        target: Address,
    },
    /// [`Ledger::remove_address_from_blacklist`]
    RemoveAddressFromBlacklist {
        /// Whitelisted admin
        caller: Address,
        /// Account to remove
        target: Address,
    },
    /// [`Ledger::pause`]
    Pause {
        /// Owner
        caller: Address,
    },
    /// [`Ledger::unpause`]
    Unpause {
        /// Owner
        caller: Address,
    },
}

impl Operation {
    /// The account on whose behalf the operation runs
    pub fn caller(&self) -> Address {
        match self {
            Operation::Transfer { caller, .. }
            | Operation::Approve { caller, .. }
            | Operation::IncreaseApproval { caller, .. }
            | Operation::DecreaseApproval { caller, .. }
            | Operation::TransferFrom { caller, .. }
            | Operation::Burn { caller, .. }
            | Operation::AddAddressToWhitelist { caller, .. }
            | Operation::RemoveAddressFromWhitelist { caller, .. }
            | Operation::AddAddressToBlacklist { caller, .. }
            | Operation::RemoveAddressFromBlacklist { caller, .. }
            | Operation::Pause { caller }
            | Operation::Unpause { caller } => *caller,
        }
    }

    /// snake_case operation name, identical to the `op` tag
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transfer { .. } => "transfer",
            Operation::Approve { .. } => "approve",
            Operation::IncreaseApproval { .. } => "increase_approval",
            Operation::DecreaseApproval { .. } => "decrease_approval",
            Operation::TransferFrom { .. } => "transfer_from",
            Operation::Burn { .. } => "burn",
            Operation::AddAddressToWhitelist { .. } => "add_address_to_whitelist",
            Operation::RemoveAddressFromWhitelist { .. } => "remove_address_from_whitelist",
            Operation::AddAddressToBlacklist { .. } => "add_address_to_blacklist",
            Operation::RemoveAddressFromBlacklist { .. } => "remove_address_from_blacklist",
            Operation::Pause { .. } => "pause",
            Operation::Unpause { .. } => "unpause",
        }
    }
}

impl Ledger {
    /// Dispatch `op` to the matching operation.
    pub fn apply(&mut self, op: &Operation) -> LedgerResult<()> {
        let result = match *op {
            Operation::Transfer { caller, to, amount } => self.transfer(caller, to, amount),
            Operation::Approve { caller, spender, amount } => self.approve(caller, spender, amount),
            Operation::IncreaseApproval { caller, spender, delta } => {
                self.increase_approval(caller, spender, delta)
            }
            Operation::DecreaseApproval { caller, spender, delta } => {
                self.decrease_approval(caller, spender, delta)
            }
            Operation::TransferFrom { caller, from, to, amount } => {
                self.transfer_from(caller, from, to, amount)
            }
            Operation::Burn { caller, amount } => self.burn(caller, amount),
            Operation::AddAddressToWhitelist { caller, target } => {
                self.add_address_to_whitelist(caller, target)
            }
            Operation::RemoveAddressFromWhitelist { caller, target } => {
                self.remove_address_from_whitelist(caller, target)
            }
            Operation::AddAddressToBlacklist { caller, target } => {
                self.add_address_to_blacklist(caller, target)
            }
            Operation::RemoveAddressFromBlacklist { caller, target } => {
                self.remove_address_from_blacklist(caller, target)
            }
            Operation::Pause { caller } => self.pause(caller),
            Operation::Unpause { caller } => self.unpause(caller),
        };

        if let Err(e) = &result {
            tracing::debug!("{} by {} rejected: {}", op.name(), op.caller(), e);
        }
        result
    }
}
