//! Core domain types for the balance ledger.

use std::fmt;

use crate::Amount;

/// User identifier. Always positive once validated.
pub type UserId = u64;

/// Caller-supplied transaction identifier, unique per user.
pub type TxId = String;

/// Outcome of the game round a transaction reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Credit the amount to the balance.
    Win,
    /// Debit the amount from the balance.
    Lose,
}

impl State {
    /// Parse the wire form. Matching is case-sensitive.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "win" => Some(State::Win),
            "lose" => Some(State::Lose),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            State::Win => "win",
            State::Lose => "lose",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a transaction, taken from the `Source-Type` header.
/// Recorded for audit only; it never affects balance math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Game,
    Server,
    Payment,
}

impl SourceType {
    /// Parse the wire form. Matching is case-sensitive.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "game" => Some(SourceType::Game),
            "server" => Some(SourceType::Server),
            "payment" => Some(SourceType::Payment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Game => "game",
            SourceType::Server => "server",
            SourceType::Payment => "payment",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated transaction, ready to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub user: UserId,
    pub id: TxId,
    pub state: State,
    pub amount: Amount,
    pub source: SourceType,
}

impl Transaction {
    /// The amount as it applies to the balance: positive for a win,
    /// negative for a loss.
    pub fn signed_amount(&self) -> Amount {
        match self.state {
            State::Win => self.amount,
            State::Lose => -self.amount,
        }
    }
}

/// Record of an applied transaction, kept for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub state: State,
    pub amount: Amount,
    pub source: SourceType,
    /// Balance right after this transaction was applied. Replays answer with
    /// this value rather than the current balance.
    pub applied_balance: Amount,
}

impl TransactionRecord {
    pub fn new(tx: &Transaction, applied_balance: Amount) -> Self {
        Self {
            state: tx.state,
            amount: tx.amount,
            source: tx.source,
            applied_balance,
        }
    }
}
