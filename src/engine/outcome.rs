use std::fmt;

use crate::Amount;
use crate::model::{TxId, UserId};

/// How a syntactically valid transaction was resolved. None of these are
/// errors: every outcome is reported to the caller as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The balance was updated and the transaction recorded.
    Applied,
    /// The balance would have gone negative; nothing changed.
    InsufficientFunds,
    /// The transaction id was already applied for this user; nothing changed.
    DuplicateIgnored,
}

impl Outcome {
    /// Human readable message returned to the caller.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Applied => "Transaction applied successfully",
            Outcome::InsufficientFunds => "Insufficient funds",
            Outcome::DuplicateIgnored => "Duplicate transaction ignored",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of processing one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub user: UserId,
    pub tx: TxId,
    pub outcome: Outcome,
    /// Balance to report: the new balance when applied, the unchanged balance
    /// on insufficient funds, the originally stored balance on a duplicate.
    pub balance: Amount,
}
