use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::transactions;
use crate::transactions::transactions_errors::{LedgerError, Result};
use crate::transactions::transactions_model::*;

/// Repository for reading ledger entries
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Retrieves a ledger entry by its ID
    pub fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => LedgerError::NotFound(format!(
                    "Transaction with id {} not found",
                    transaction_id
                )),
                _ => LedgerError::DatabaseError(e.to_string()),
            })?
            .try_into()
    }

    /// Retrieves all entries for an account ordered by effective date
    pub fn get_by_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions::table
            .filter(transactions::account_id.eq(account_id))
            .order((
                transactions::session_year.asc(),
                transactions::session_day.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map_err(LedgerError::from)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Retrieves entries for an account filtered by status
    pub fn get_by_account_and_status(
        &self,
        account_id: &str,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions::table
            .filter(transactions::account_id.eq(account_id))
            .filter(transactions::status.eq(status.as_str()))
            .order((
                transactions::session_year.asc(),
                transactions::session_day.asc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map_err(LedgerError::from)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Retrieves entries for an account filtered by fiscal year
    pub fn get_by_account_and_year(
        &self,
        account_id: &str,
        year: i32,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions::table
            .filter(transactions::account_id.eq(account_id))
            .filter(transactions::session_year.eq(year))
            .order(transactions::session_day.asc())
            .load::<TransactionDB>(&mut conn)
            .map_err(LedgerError::from)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Retrieves all active entries carrying the given source pointer
    pub fn get_by_related(&self, related: &RelatedEntity) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions::table
            .filter(transactions::related_entity_type.eq(related.entity_type()))
            .filter(transactions::related_entity_id.eq(related.entity_id()))
            .load::<TransactionDB>(&mut conn)
            .map_err(LedgerError::from)?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
