pub mod amount;
pub mod config;
pub mod engine;
pub mod http;
pub mod ledger;
pub mod model;
pub mod validation;

pub use amount::Amount;
pub use config::Config;
pub use engine::{Engine, Outcome, Receipt};
pub use ledger::{Ledger, LedgerError};
pub use model::{SourceType, State, Transaction, TxId, UserId};
