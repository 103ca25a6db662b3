//! # kbx-ledger
//!
//! Permissioned fixed-supply ledger engine.
//!
//! This crate provides:
//! - Balance transfer, delegated transfer (allowances) and burn
//! - Whitelist, blacklist and pause gates over every mutating operation
//! - Genesis configuration
//! - A serializable operation envelope for replaying scripted calls
//! - A lock-guarded handle for concurrent callers
//!
//! ```
//! use kbx_ledger::{ErrorKind, Ledger};
//! use kbx_primitives::{Address, Amount};
//!
//! let owner = Address::from_low_u8(1);
//! let alice = Address::from_low_u8(2);
//! let mut ledger = Ledger::new("KubitCoin", "KBX", 18, Amount::from(1_000u64), owner);
//!
//! ledger.transfer(owner, alice, Amount::from(10u64)).unwrap();
//! assert_eq!(ledger.balance_of(&alice), Amount::from(10u64));
//!
//! let err = ledger.burn(alice, Amount::from(1u64)).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotWhitelisted);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod genesis;
mod ledger;
mod operation;
mod policy;
mod shared;

pub use error::{ErrorKind, InvariantViolation, LedgerError, LedgerResult};
pub use genesis::{GenesisConfig, GenesisError, GenesisResult};
pub use ledger::Ledger;
pub use operation::Operation;
pub use policy::ApprovalPolicy;
pub use shared::SharedLedger;
