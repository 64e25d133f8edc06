use diesel::prelude::*;
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::{transaction_archive, transactions};
use crate::transactions::transactions_model::parse_amount;
use crate::transactions::{
    NewLedgerEntry, RelatedEntity, TransactionDB, TransactionStatus, STATUS_PENDING, STATUS_VOID,
};

use super::fiscal_errors::{FiscalYearError, Result};
use super::fiscal_model::{ArchivedTransaction, FiscalYearClose, TransactionArchiveDB};

/// Service that seals fiscal years.
///
/// Closing a year replaces its entries with one carry-forward snapshot; the
/// account balance is identical before and after because the snapshot's
/// amount equals the exact sum of what was removed.
pub struct FiscalYearService {
    pool: Arc<DbPool>,
}

impl FiscalYearService {
    /// Creates a new FiscalYearService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Seals one fiscal year of an account.
    ///
    /// Fails without any effect if the year still holds PENDING or VOID
    /// entries. The archive copies, the deletions and the snapshot insert
    /// commit as a single database transaction.
    pub fn close_fiscal_year(&self, account_id: &str, year: i32) -> Result<FiscalYearClose> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| FiscalYearError::DatabaseError(e.to_string()))?;

        conn.transaction::<FiscalYearClose, FiscalYearError, _>(|tx| {
            let rows: Vec<TransactionDB> = transactions::table
                .filter(transactions::account_id.eq(account_id))
                .filter(transactions::session_year.eq(year))
                .load(tx)?;

            if rows.is_empty() {
                return Err(FiscalYearError::NothingToClose(year));
            }

            let pending = rows.iter().filter(|r| r.status == STATUS_PENDING).count();
            let void = rows.iter().filter(|r| r.status == STATUS_VOID).count();
            if pending > 0 || void > 0 {
                return Err(FiscalYearError::UnresolvedTransactions {
                    year,
                    pending,
                    void,
                });
            }

            // Every remaining row is POSTED; their exact sum is what the
            // snapshot must carry forward.
            let mut sum = Decimal::ZERO;
            for row in &rows {
                sum += parse_amount(&row.amount)
                    .map_err(|e| FiscalYearError::InvalidData(e.to_string()))?;
            }

            let archived_at = chrono::Utc::now().naive_utc();
            let archive_rows: Vec<TransactionArchiveDB> = rows
                .iter()
                .map(|row| TransactionArchiveDB::from_active(row, archived_at))
                .collect();

            diesel::insert_into(transaction_archive::table)
                .values(&archive_rows)
                .execute(tx)?;

            let ids: Vec<&String> = rows.iter().map(|row| &row.id).collect();
            diesel::delete(transactions::table.filter(transactions::id.eq_any(ids)))
                .execute(tx)?;

            let snapshot_entry = NewLedgerEntry {
                account_id: account_id.to_string(),
                amount: sum,
                description: format!("Fiscal year {} closing balance", year),
                session_day: 1,
                session_year: year + 1,
                related: Some(RelatedEntity::Snapshot(year)),
                forced_status: None,
            };
            let snapshot_db = TransactionDB::from_entry(&snapshot_entry, TransactionStatus::Posted);

            diesel::insert_into(transactions::table)
                .values(&snapshot_db)
                .execute(tx)?;

            info!(
                "Closed fiscal year {} for account {}: {} entries archived, {} carried forward",
                year,
                account_id,
                rows.len(),
                sum
            );

            Ok(FiscalYearClose {
                account_id: account_id.to_string(),
                year,
                archived_count: rows.len(),
                carried_forward: sum,
                snapshot_id: snapshot_db.id,
            })
        })
    }

    /// Lists archived entries for an account, optionally scoped to a year
    pub fn get_archived_transactions(
        &self,
        account_id: &str,
        year: Option<i32>,
    ) -> Result<Vec<ArchivedTransaction>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| FiscalYearError::DatabaseError(e.to_string()))?;

        let mut query = transaction_archive::table
            .filter(transaction_archive::account_id.eq(account_id))
            .into_boxed();

        if let Some(y) = year {
            query = query.filter(transaction_archive::session_year.eq(y));
        }

        query
            .order((
                transaction_archive::session_year.asc(),
                transaction_archive::session_day.asc(),
            ))
            .load::<TransactionArchiveDB>(&mut conn)
            .map_err(FiscalYearError::from)?
            .into_iter()
            .map(ArchivedTransaction::try_from)
            .collect()
    }
}
