use std::collections::HashMap;

use crate::Amount;
use crate::ledger::LedgerError;
use crate::model::{Transaction, TransactionRecord, TxId, UserId};

/// A user account: its balance and every transaction applied to it.
#[derive(Debug)]
pub struct UserAccount {
    id: UserId,
    balance: Amount,
    applied: HashMap<TxId, TransactionRecord>,
}

impl UserAccount {
    pub fn new(id: UserId, balance: Amount) -> Self {
        Self {
            id,
            balance,
            applied: HashMap::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Balance recorded right after `tx` was applied, if it was.
    pub fn applied_balance(&self, tx: &str) -> Option<Amount> {
        self.applied.get(tx).map(|record| record.applied_balance)
    }

    #[cfg(test)]
    fn record(&self, tx: &str) -> Option<&TransactionRecord> {
        self.applied.get(tx)
    }

    #[cfg(test)]
    fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Apply `delta` to the balance on behalf of `tx`:
    /// - Already applied: return the stored balance, nothing changes
    /// - Would go negative: nothing changes and nothing is recorded
    /// - Otherwise commit the new balance and record the transaction
    pub fn apply_delta(&mut self, tx: &Transaction, delta: Amount) -> Result<Amount, LedgerError> {
        if let Some(balance) = self.applied_balance(&tx.id) {
            return Ok(balance);
        }

        let new_balance =
            self.balance
                .checked_add(delta)
                .ok_or_else(|| LedgerError::BalanceOverflow {
                    user: self.id,
                    tx: tx.id.clone(),
                    balance: self.balance,
                    delta,
                })?;

        if new_balance.is_negative() {
            return Err(LedgerError::InsufficientFunds {
                user: self.id,
                balance: self.balance,
                delta,
            });
        }

        self.balance = new_balance;
        self.applied
            .insert(tx.id.clone(), TransactionRecord::new(tx, new_balance));

        Ok(new_balance)
    }
}
