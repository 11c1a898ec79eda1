use serde::Serialize;

use crate::Amount;
use crate::engine::Receipt;
use crate::model::{TxId, UserId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub user_id: UserId,
    pub balance: Amount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub user_id: UserId,
    pub transaction_id: TxId,
    pub balance: Amount,
    pub message: &'static str,
}

impl From<Receipt> for TransactionResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            user_id: receipt.user,
            transaction_id: receipt.tx,
            balance: receipt.balance,
            message: receipt.outcome.message(),
        }
    }
}
