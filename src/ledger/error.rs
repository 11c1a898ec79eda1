//! Error types for ledger operations.

use thiserror::Error;

use crate::Amount;
use crate::model::{TxId, UserId};

/// Error returned by [`Ledger`](super::Ledger) and [`UserAccount`](super::UserAccount).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("insufficient funds for user {user}: balance {balance}, delta {delta}")]
    InsufficientFunds {
        user: UserId,
        balance: Amount,
        delta: Amount,
    },

    #[error("balance overflow for user {user} on transaction {tx}: balance {balance}, delta {delta}")]
    BalanceOverflow {
        user: UserId,
        tx: TxId,
        balance: Amount,
        delta: Amount,
    },
}
