//! Transaction processing engine.
//!
//! The engine applies validated transactions against the [`Ledger`] and
//! classifies each one as applied, rejected for insufficient funds, or
//! ignored as a duplicate.

use tracing::{error, info};

use crate::Amount;
use crate::ledger::{Ledger, LedgerError};
use crate::model::{Transaction, UserId};

mod outcome;
pub use outcome::{Outcome, Receipt};

/// The transaction processing engine.
#[derive(Debug)]
pub struct Engine {
    ledger: Ledger,
}

/// Public API
impl Engine {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current balance of one user.
    pub async fn balance(&self, user: UserId) -> Result<Amount, LedgerError> {
        self.ledger.get_balance(user).await
    }

    /// Process a single transaction:
    /// - Lock the user's account for the whole operation
    /// - Already applied: report the stored balance as a duplicate
    /// - Otherwise apply the signed amount, reporting insufficient funds
    ///   with the unchanged balance if it would go negative
    pub async fn process(&self, tx: Transaction) -> Result<Receipt, LedgerError> {
        let delta = tx.signed_amount();

        let result = {
            let mut account = self.ledger.lock(tx.user).await?;

            match account.applied_balance(&tx.id) {
                Some(balance) => Ok((Outcome::DuplicateIgnored, balance)),
                None => match account.apply_delta(&tx, delta) {
                    Ok(balance) => Ok((Outcome::Applied, balance)),
                    Err(LedgerError::InsufficientFunds { balance, .. }) => {
                        Ok((Outcome::InsufficientFunds, balance))
                    }
                    Err(e) => Err(e),
                },
            }
        };

        Self::log_result(&tx, &result);

        let (outcome, balance) = result?;
        Ok(Receipt {
            user: tx.user,
            tx: tx.id,
            outcome,
            balance,
        })
    }
}

/// Private API
impl Engine {
    /// Small helper to log `process` results
    fn log_result(tx: &Transaction, result: &Result<(Outcome, Amount), LedgerError>) {
        match result {
            Ok((Outcome::Applied, balance)) => {
                info!(
                    user = tx.user,
                    tx = %tx.id,
                    source = %tx.source,
                    amount = %tx.amount,
                    balance = %balance,
                    "{} applied",
                    tx.state
                );
            }
            Ok((outcome, balance)) => {
                info!(
                    user = tx.user,
                    tx = %tx.id,
                    source = %tx.source,
                    amount = %tx.amount,
                    balance = %balance,
                    reason = %outcome,
                    "{} skipped",
                    tx.state
                );
            }
            Err(e) => {
                error!(
                    user = tx.user,
                    tx = %tx.id,
                    source = %tx.source,
                    amount = %tx.amount,
                    reason = %e,
                    "{} failed",
                    tx.state
                );
            }
        }
    }
}
