use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FiscalYearError>;

/// Custom error type for fiscal year closing
#[derive(Debug, Error)]
pub enum FiscalYearError {
    /// The one user-facing precondition failure: the year still holds
    /// entries that cannot be archived.
    #[error(
        "Fiscal year {year} has {pending} pending and {void} void transaction(s); resolve them before closing"
    )]
    UnresolvedTransactions { year: i32, pending: usize, void: usize },

    #[error("No transactions to close for fiscal year {0}")]
    NothingToClose(i32),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for FiscalYearError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => FiscalYearError::DatabaseError("Record not found".to_string()),
            _ => FiscalYearError::DatabaseError(err.to_string()),
        }
    }
}
