//! Ledger state and its state-transition rules

use crate::error::{InvariantViolation, LedgerError, LedgerResult};
use crate::policy::ApprovalPolicy;
use kbx_primitives::{Address, Amount, Decimals};
use std::collections::{BTreeSet, HashMap};

/// The complete ledger: balances, allowances, access-control sets and the pause flag.
///
/// Every mutating operation runs its checks in a fixed order (pause, access
/// control, allowance and balance sufficiency, blacklist transfer gate) and
/// touches state only after all of them pass.
///
/// Zero balances and zero allowances are not stored; reads of a missing entry
/// return zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    name: String,
    symbol: String,
    decimals: Decimals,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    owner: Address,
    whitelist: BTreeSet<Address>,
    blacklist: BTreeSet<Address>,
    paused: bool,
    approval_policy: ApprovalPolicy,
}

impl Ledger {
    /// Genesis: credit the whole supply to `owner` and whitelist it.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: Decimals,
        total_supply: Amount,
        owner: Address,
    ) -> Self {
        Self::new_with_policy(name, symbol, decimals, total_supply, owner, ApprovalPolicy::default())
    }

    /// Genesis with an explicit allowance decrease policy.
    pub fn new_with_policy(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: Decimals,
        total_supply: Amount,
        owner: Address,
        approval_policy: ApprovalPolicy,
    ) -> Self {
        let mut ledger = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            owner,
            whitelist: BTreeSet::new(),
            blacklist: BTreeSet::new(),
            paused: false,
            approval_policy,
        };
        ledger.set_balance(owner, total_supply);
        ledger.whitelist.insert(owner);
        ledger
    }

    // ==================== Queries ====================

    /// Token name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display scaling exponent
    pub fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Sum of all balances
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `account`, zero if never credited
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Remaining amount `spender` may move out of `owner`'s balance
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Administrative account fixed at genesis
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Whitelist membership
    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.whitelist.contains(account)
    }

    /// Blacklist membership
    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.blacklist.contains(account)
    }

    /// Number of whitelisted accounts, never zero
    pub fn number_of_whitelists(&self) -> usize {
        self.whitelist.len()
    }

    /// Whether mutating operations are frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Allowance decrease policy chosen at genesis
    pub fn approval_policy(&self) -> ApprovalPolicy {
        self.approval_policy
    }

    /// Whitelisted accounts in address order
    pub fn whitelisted(&self) -> impl Iterator<Item = &Address> + '_ {
        self.whitelist.iter()
    }

    /// Blacklisted accounts in address order
    pub fn blacklisted(&self) -> impl Iterator<Item = &Address> + '_ {
        self.blacklist.iter()
    }

    /// Accounts holding a non-zero balance
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Amount)> + '_ {
        self.balances.iter()
    }

    /// Verify supply conservation and the non-empty whitelist.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let sum = self
            .balances
            .values()
            .try_fold(Amount::zero(), |acc, b| acc.checked_add(*b));
        match sum {
            Some(sum) if sum == self.total_supply => {}
            sum => {
                return Err(InvariantViolation::SupplyMismatch {
                    sum: sum.unwrap_or(Amount::MAX),
                    total_supply: self.total_supply,
                })
            }
        }
        if self.whitelist.is_empty() {
            return Err(InvariantViolation::EmptyWhitelist);
        }
        Ok(())
    }

    // ==================== Value movement ====================

    /// Move `amount` from `caller` to `to`.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ensure_balance(&caller, amount)?;
        self.ensure_transfer_allowed(&caller, &to)?;

        self.move_balance(caller, to, amount)?;
        tracing::debug!("transfer: {} -> {} amount={}", caller, to, amount);
        Ok(())
    }

    /// Set the allowance of `spender` over `caller`'s balance to exactly `amount`.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> LedgerResult<()> {
        self.ensure_not_paused()?;

        self.set_allowance(caller, spender, amount);
        tracing::debug!("approve: owner={} spender={} amount={}", caller, spender, amount);
        Ok(())
    }

    /// Grow the allowance of `spender` by `delta`.
    pub fn increase_approval(
        &mut self,
        caller: Address,
        spender: Address,
        delta: Amount,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        let current = self.allowance(&caller, &spender);
        let updated = current.checked_add(delta).ok_or(LedgerError::Overflow)?;

        self.set_allowance(caller, spender, updated);
        tracing::debug!(
            "increase_approval: owner={} spender={} allowance={}",
            caller,
            spender,
            updated
        );
        Ok(())
    }

    /// Shrink the allowance of `spender` by `delta`, following the approval policy
    /// when `delta` exceeds it.
    pub fn decrease_approval(
        &mut self,
        caller: Address,
        spender: Address,
        delta: Amount,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        let current = self.allowance(&caller, &spender);
        let updated = match (current.checked_sub(delta), self.approval_policy) {
            (Some(rest), _) => rest,
            (None, ApprovalPolicy::Clamp) => Amount::zero(),
            (None, ApprovalPolicy::Strict) => {
                return Err(LedgerError::InsufficientAllowance {
                    required: delta,
                    available: current,
                })
            }
        };

        self.set_allowance(caller, spender, updated);
        tracing::debug!(
            "decrease_approval: owner={} spender={} allowance={}",
            caller,
            spender,
            updated
        );
        Ok(())
    }

    /// Spend `caller`'s allowance over `from` to move `amount` to `to`.
    ///
    /// The blacklist gate applies to `from`, the balance owner, not to the spender.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        let allowance = self.allowance(&from, &caller);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount,
                available: allowance,
            });
        }
        self.ensure_balance(&from, amount)?;
        self.ensure_transfer_allowed(&from, &to)?;

        self.move_balance(from, to, amount)?;
        self.set_allowance(from, caller, allowance - amount);
        tracing::debug!(
            "transfer_from: spender={} {} -> {} amount={}",
            caller,
            from,
            to,
            amount
        );
        Ok(())
    }

    /// Destroy `amount` of `caller`'s balance, shrinking the total supply with it.
    pub fn burn(&mut self, caller: Address, amount: Amount) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ensure_whitelisted(&caller)?;
        let balance = self.ensure_balance(&caller, amount)?;

        self.set_balance(caller, balance - amount);
        self.total_supply -= amount;
        tracing::debug!("burn: {} amount={} supply={}", caller, amount, self.total_supply);
        Ok(())
    }

    // ==================== Access control ====================

    /// Whitelist `target`. Idempotent.
    pub fn add_address_to_whitelist(&mut self, caller: Address, target: Address) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ensure_whitelisted(&caller)?;

        if self.whitelist.insert(target) {
            tracing::debug!("whitelist add: {} by {}", target, caller);
        }
        Ok(())
    }

    /// Remove `target` from the whitelist. Removing a non-member succeeds without effect;
    /// removing the last member fails.
    pub fn remove_address_from_whitelist(
        &mut self,
        caller: Address,
        target: Address,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ensure_whitelisted(&caller)?;
        if !self.whitelist.contains(&target) {
            return Ok(());
        }
        if self.whitelist.len() == 1 {
            return Err(LedgerError::LastWhitelistedAddress(target));
        }

        self.whitelist.remove(&target);
        tracing::debug!("whitelist remove: {} by {}", target, caller);
        Ok(())
    }

    /// Blacklist `target`. Idempotent.
    pub fn add_address_to_blacklist(&mut self, caller: Address, target: Address) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ensure_whitelisted(&caller)?;

        if self.blacklist.insert(target) {
            tracing::debug!("blacklist add: {} by {}", target, caller);
        }
        Ok(())
    }

    /// Lift the blacklist restriction from `target`. Idempotent.
    pub fn remove_address_from_blacklist(
        &mut self,
        caller: Address,
        target: Address,
    ) -> LedgerResult<()> {
        self.ensure_not_paused()?;
        self.ensure_whitelisted(&caller)?;

        if self.blacklist.remove(&target) {
            tracing::debug!("blacklist remove: {} by {}", target, caller);
        }
        Ok(())
    }

    /// Freeze all mutating operations. Owner only; not subject to the pause gate.
    pub fn pause(&mut self, caller: Address) -> LedgerResult<()> {
        self.ensure_owner(&caller)?;
        if !self.paused {
            self.paused = true;
            tracing::info!("ledger paused by {}", caller);
        }
        Ok(())
    }

    /// Resume mutating operations. Owner only; not subject to the pause gate.
    pub fn unpause(&mut self, caller: Address) -> LedgerResult<()> {
        self.ensure_owner(&caller)?;
        if self.paused {
            self.paused = false;
            tracing::info!("ledger unpaused by {}", caller);
        }
        Ok(())
    }

    // ==================== Guards ====================

    fn ensure_not_paused(&self) -> LedgerResult<()> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    fn ensure_whitelisted(&self, caller: &Address) -> LedgerResult<()> {
        if !self.is_whitelisted(caller) {
            return Err(LedgerError::NotWhitelisted(*caller));
        }
        Ok(())
    }

    fn ensure_owner(&self, caller: &Address) -> LedgerResult<()> {
        if *caller != self.owner {
            return Err(LedgerError::NotOwner(*caller));
        }
        Ok(())
    }

    /// Returns the current balance when it covers `amount`.
    fn ensure_balance(&self, account: &Address, amount: Amount) -> LedgerResult<Amount> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        Ok(available)
    }

    fn ensure_transfer_allowed(&self, from: &Address, to: &Address) -> LedgerResult<()> {
        if self.is_blacklisted(from) && !self.is_whitelisted(to) {
            return Err(LedgerError::BlacklistRestricted { from: *from, to: *to });
        }
        Ok(())
    }

    // ==================== Raw state ====================

    /// Callers have already checked that `from` holds `amount`.
    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> LedgerResult<()> {
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let debited = self.balance_of(&from) - amount;
        self.set_balance(from, debited);
        self.set_balance(to, credited);
        Ok(())
    }

    fn set_balance(&mut self, account: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }
}
