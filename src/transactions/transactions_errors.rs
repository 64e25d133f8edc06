use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::accounts::AccountError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Custom error type for ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for LedgerError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => LedgerError::NotFound("Record not found".to_string()),
            _ => LedgerError::DatabaseError(err.to_string()),
        }
    }
}

impl From<AccountError> for LedgerError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(msg) => LedgerError::NotFound(msg),
            other => LedgerError::DatabaseError(other.to_string()),
        }
    }
}

impl From<rust_decimal::Error> for LedgerError {
    fn from(err: rust_decimal::Error) -> Self {
        LedgerError::InvalidData(format!("Failed to parse decimal number: {}", err))
    }
}
