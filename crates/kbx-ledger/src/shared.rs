//! Ledger handle for concurrent callers

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::operation::Operation;
use kbx_primitives::{Address, Amount};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle serializing access to one [`Ledger`].
///
/// Every mutation holds the write lock across its whole check-then-apply
/// sequence, so two callers can never both spend the same balance.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    /// Wrap a ledger
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run `f` with shared read access
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` with exclusive access. `f` must not block on anything external.
    pub fn write<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        f(&mut *self.inner.write())
    }

    /// Apply one operation atomically
    pub fn apply(&self, op: &Operation) -> LedgerResult<()> {
        self.inner.write().apply(op)
    }

    /// See [`Ledger::transfer`]
    pub fn transfer(&self, caller: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        self.inner.write().transfer(caller, to, amount)
    }

    /// See [`Ledger::transfer_from`]
    pub fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.inner.write().transfer_from(caller, from, to, amount)
    }

    /// See [`Ledger::balance_of`]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.inner.read().balance_of(account)
    }

    /// See [`Ledger::total_supply`]
    pub fn total_supply(&self) -> Amount {
        self.inner.read().total_supply()
    }

    /// Point-in-time copy of the whole ledger
    pub fn snapshot(&self) -> Ledger {
        self.inner.read().clone()
    }
}

impl std::fmt::Debug for SharedLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never block here: the caller may already hold the write lock
        match self.inner.try_read() {
            Some(ledger) => f
                .debug_struct("SharedLedger")
                .field("total_supply", &ledger.total_supply())
                .field("paused", &ledger.is_paused())
                .finish(),
            None => f.debug_struct("SharedLedger").field("state", &"<locked>").finish(),
        }
    }
}
