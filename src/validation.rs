//! Request validation.
//!
//! Every check here is pure. Checks run in a fixed order and the first failure
//! is reported; the ledger is only consulted at the very end to confirm the
//! user exists.

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;
use thiserror::Error;

use crate::amount::{Amount, AmountError};
use crate::ledger::Ledger;
use crate::model::{SourceType, State, Transaction, TxId, UserId};

/// Client input errors. All of them are reported as 4xx and never retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid user ID '{0}': must be a positive integer")]
    InvalidUserId(String),

    #[error("invalid Source-Type header: must be 'game', 'server', or 'payment'")]
    InvalidSourceType,

    #[error("invalid request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid state '{0}': must be 'win' or 'lose'")]
    InvalidState(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("user {0} not found")]
    UserNotFound(UserId),
}

/// Raw transaction body as sent by the caller. Fields are optional so a
/// missing one is reported as such instead of as a generic decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
    pub state: Option<String>,
    pub amount: Option<String>,
    pub transaction_id: Option<String>,
}

/// Parse a `userId` path segment: a base-10 integer of at least 1.
pub fn parse_user_id(raw: &str) -> Result<UserId, ValidationError> {
    match raw.parse::<UserId>() {
        Ok(user) if user >= 1 => Ok(user),
        _ => Err(ValidationError::InvalidUserId(raw.to_string())),
    }
}

/// Parse the `Source-Type` header value, if one was sent.
pub fn parse_source_type(raw: Option<&str>) -> Result<SourceType, ValidationError> {
    raw.and_then(SourceType::from_wire)
        .ok_or(ValidationError::InvalidSourceType)
}

pub fn parse_state(raw: Option<&str>) -> Result<State, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingField("state"))?;
    State::from_wire(raw).ok_or_else(|| ValidationError::InvalidState(raw.to_string()))
}

pub fn parse_amount(raw: Option<&str>) -> Result<Amount, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingField("amount"))?;
    Ok(raw.parse()?)
}

pub fn parse_transaction_id(raw: Option<String>) -> Result<TxId, ValidationError> {
    raw.filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingField("transactionId"))
}

/// Decode the request body. Only a JSON object is accepted; serde would
/// otherwise read a positional array into the struct.
pub fn parse_body(raw: &[u8]) -> Result<TransactionBody, ValidationError> {
    match serde_json::from_slice::<Value>(raw)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Err(serde_json::Error::custom("expected a JSON object").into()),
    }
}

/// Confirm `user` names a seeded account.
pub fn ensure_exists(ledger: &Ledger, user: UserId) -> Result<UserId, ValidationError> {
    if ledger.contains(user) {
        Ok(user)
    } else {
        Err(ValidationError::UserNotFound(user))
    }
}

/// Validate the path segment of a balance lookup.
pub fn validate_user(ledger: &Ledger, raw_user: &str) -> Result<UserId, ValidationError> {
    let user = parse_user_id(raw_user)?;
    ensure_exists(ledger, user)
}

/// Validate every part of a transaction request, in order:
/// user id, source type, body shape, state, amount, transaction id, and
/// finally the existence of the user.
pub fn validate_transaction(
    ledger: &Ledger,
    raw_user: &str,
    source: Option<&str>,
    body: &[u8],
) -> Result<Transaction, ValidationError> {
    let user = parse_user_id(raw_user)?;
    let source = parse_source_type(source)?;
    let body = parse_body(body)?;
    let state = parse_state(body.state.as_deref())?;
    let amount = parse_amount(body.amount.as_deref())?;
    let id = parse_transaction_id(body.transaction_id)?;
    let user = ensure_exists(ledger, user)?;

    Ok(Transaction {
        user,
        id,
        state,
        amount,
        source,
    })
}
