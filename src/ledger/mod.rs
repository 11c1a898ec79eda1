//! In-memory balance ledger.
//!
//! Holds one independently lockable cell per user. The set of users is fixed
//! when the ledger is built, so looking a user up never contends; only
//! operations on the same user serialize on that user's mutex.

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard};

use crate::Amount;
use crate::model::{Transaction, UserId};

mod state;
pub use state::UserAccount;

mod error;
pub use error::LedgerError;

/// The authoritative store of balances and applied transactions.
#[derive(Debug)]
pub struct Ledger {
    accounts: HashMap<UserId, Mutex<UserAccount>>,
}

/// Public API
impl Ledger {
    /// Build a ledger seeded with the given accounts. Later entries win on
    /// duplicate ids.
    pub fn new(seed: impl IntoIterator<Item = (UserId, Amount)>) -> Self {
        let accounts = seed
            .into_iter()
            .map(|(user, balance)| (user, Mutex::new(UserAccount::new(user, balance))))
            .collect();
        Self { accounts }
    }

    /// Whether `user` is a known account. Takes no lock.
    pub fn contains(&self, user: UserId) -> bool {
        self.accounts.contains_key(&user)
    }

    /// Ids of every seeded account, in no particular order.
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.accounts.keys().copied()
    }

    /// Take exclusive access to one user's account. Everything done through
    /// the guard is atomic with respect to other requests for that user.
    pub async fn lock(&self, user: UserId) -> Result<MutexGuard<'_, UserAccount>, LedgerError> {
        let cell = self
            .accounts
            .get(&user)
            .ok_or(LedgerError::UserNotFound(user))?;
        Ok(cell.lock().await)
    }

    pub async fn get_balance(&self, user: UserId) -> Result<Amount, LedgerError> {
        Ok(self.lock(user).await?.balance())
    }

    /// Balance stored when `tx` was applied for `user`, if it was.
    pub async fn has_applied(&self, user: UserId, tx: &str) -> Result<Option<Amount>, LedgerError> {
        Ok(self.lock(user).await?.applied_balance(tx))
    }

    /// Apply `delta` for `tx` as one atomic step on the transaction's user.
    /// See [`UserAccount::apply_delta`].
    pub async fn apply_delta(&self, tx: &Transaction, delta: Amount) -> Result<Amount, LedgerError> {
        self.lock(tx.user).await?.apply_delta(tx, delta)
    }
}
