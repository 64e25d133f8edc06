use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::accounts::AccountRepository;
use crate::campaign::{CampaignDate, ClockProvider};
use crate::db::DbPool;
use crate::schema::transactions;
use crate::transactions::transactions_constants::*;
use crate::transactions::transactions_errors::{LedgerError, Result};
use crate::transactions::transactions_model::*;
use crate::transactions::transactions_traits::LedgerServiceTrait;

/// Derives the status of a freshly created entry from its effective date.
///
/// Year-major, day-minor: an entry dated on or before the campaign's
/// current date is already effective.
pub fn derive_status(effective: CampaignDate, current: CampaignDate) -> TransactionStatus {
    if effective <= current {
        TransactionStatus::Posted
    } else {
        TransactionStatus::Pending
    }
}

/// Service that writes ledger entries and keeps the cached balance in step.
///
/// Every operation commits the entry and its balance effect in a single
/// database transaction.
pub struct LedgerService {
    pool: Arc<DbPool>,
    clock: Arc<dyn ClockProvider>,
}

impl LedgerService {
    /// Creates a new LedgerService instance
    pub fn new(pool: Arc<DbPool>, clock: Arc<dyn ClockProvider>) -> Self {
        Self { pool, clock }
    }

    fn record(&self, entry: NewLedgerEntry) -> Result<Transaction> {
        entry.validate()?;

        let status = match entry.forced_status {
            Some(forced) => forced,
            None => {
                let current = self
                    .clock
                    .current_date()
                    .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;
                derive_status(entry.effective_date(), current)
            }
        };

        debug!(
            "Recording {} entry of {} for account {} at {}",
            status.as_str(),
            entry.amount,
            entry.account_id,
            entry.effective_date()
        );

        let mut conn = self
            .pool
            .get()
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        conn.transaction::<Transaction, LedgerError, _>(|tx| {
            let transaction_db = TransactionDB::from_entry(&entry, status);

            diesel::insert_into(transactions::table)
                .values(&transaction_db)
                .execute(tx)?;

            if status == TransactionStatus::Posted {
                AccountRepository::apply_credit_delta(tx, &entry.account_id, entry.amount)?;
            }

            transaction_db.try_into()
        })
    }
}

impl LedgerServiceTrait for LedgerService {
    fn deposit(&self, entry: NewLedgerEntry) -> Result<Transaction> {
        self.record(entry)
    }

    fn withdraw(&self, mut entry: NewLedgerEntry) -> Result<Transaction> {
        entry.amount = -entry.amount;
        self.record(entry)
    }

    fn reverse(&self, related: &RelatedEntity) -> Result<usize> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        conn.transaction::<usize, LedgerError, _>(|tx| {
            let rows: Vec<TransactionDB> = transactions::table
                .filter(transactions::related_entity_type.eq(related.entity_type()))
                .filter(transactions::related_entity_id.eq(related.entity_id()))
                .load(tx)?;

            if rows.is_empty() {
                // Documents that never produced entries reverse as a no-op.
                debug!(
                    "Nothing to reverse for {} {}",
                    related.entity_type(),
                    related.entity_id()
                );
                return Ok(0);
            }

            for row in &rows {
                if row.status == STATUS_POSTED {
                    let amount = parse_amount(&row.amount)?;
                    AccountRepository::apply_credit_delta(tx, &row.account_id, -amount)?;
                }
            }

            let ids: Vec<&String> = rows.iter().map(|row| &row.id).collect();
            diesel::delete(transactions::table.filter(transactions::id.eq_any(ids)))
                .execute(tx)?;

            debug!(
                "Reversed {} entries for {} {}",
                rows.len(),
                related.entity_type(),
                related.entity_id()
            );
            Ok(rows.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn entries_dated_on_or_before_now_post_immediately() {
        let now = CampaignDate::new(100, 1105);
        assert_eq!(
            derive_status(CampaignDate::new(100, 1105), now),
            TransactionStatus::Posted
        );
        assert_eq!(
            derive_status(CampaignDate::new(1, 1104), now),
            TransactionStatus::Posted
        );
    }

    #[test]
    fn future_entries_stay_pending() {
        let now = CampaignDate::new(100, 1105);
        assert_eq!(
            derive_status(CampaignDate::new(101, 1105), now),
            TransactionStatus::Pending
        );
        // Year-major ordering: an earlier day in a later year is still future.
        assert_eq!(
            derive_status(CampaignDate::new(1, 1106), now),
            TransactionStatus::Pending
        );
    }

    #[test]
    fn entry_validation_rejects_bad_input() {
        let entry = NewLedgerEntry {
            account_id: "  ".to_string(),
            amount: dec!(10),
            description: "test".to_string(),
            session_day: 1,
            session_year: 1105,
            related: None,
            forced_status: None,
        };
        assert!(entry.validate().is_err());

        let entry = NewLedgerEntry {
            account_id: "acct".to_string(),
            amount: dec!(10),
            description: "test".to_string(),
            session_day: 0,
            session_year: 1105,
            related: None,
            forced_status: None,
        };
        assert!(entry.validate().is_err());
    }
}
