use diesel::prelude::*;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::accounts::AccountRepository;
use crate::db::DbPool;
use crate::documents::{DocumentBridge, RecurringDocumentProducer};
use crate::errors::{Error, Result};
use crate::schema::transactions;
use crate::transactions::transactions_model::parse_amount;
use crate::transactions::{TransactionDB, STATUS_PENDING, STATUS_POSTED};

use super::campaign_model::{CampaignDate, ClockChange, SyncSummary};
use super::campaign_repository::CampaignRepository;

/// Service that moves the campaign clock and reclassifies ledger entries.
///
/// Moving the clock in either direction leaves every account's balance
/// equal to the sum of its entries that are effective as of the new date.
pub struct CampaignService {
    pool: Arc<DbPool>,
}

impl CampaignService {
    /// Creates a new CampaignService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Reads the campaign's current date
    pub fn get_current_date(&self) -> Result<CampaignDate> {
        CampaignRepository::new(self.pool.clone()).get_clock()
    }

    /// Moves the clock and resyncs every active account
    pub fn set_current_date(&self, new_date: CampaignDate) -> Result<ClockChange> {
        let change = CampaignRepository::new(self.pool.clone()).set_clock(new_date)?;
        info!(
            "Campaign clock moved {} -> {}",
            change.previous, change.current
        );

        self.sync_all(change.current)?;
        Ok(change)
    }

    /// Moves the clock, collects newly-due recurring documents from the
    /// producer, feeds them through the bridge, then resyncs. The producer
    /// pass runs before sync so forward movement surfaces new charges.
    pub fn advance_clock(
        &self,
        new_date: CampaignDate,
        producer: &dyn RecurringDocumentProducer,
        bridge: &DocumentBridge,
    ) -> Result<ClockChange> {
        let change = CampaignRepository::new(self.pool.clone()).set_clock(new_date)?;
        info!(
            "Campaign clock moved {} -> {}",
            change.previous, change.current
        );

        let due = producer.documents_due(change.current)?;
        debug!("Recurring producer supplied {} document(s)", due.len());
        for doc in &due {
            bridge.document_created(doc)?;
        }

        self.sync_all(change.current)?;
        Ok(change)
    }

    /// Resyncs every active account against the given date
    pub fn sync_all(&self, now: CampaignDate) -> Result<SyncSummary> {
        let accounts = AccountRepository::new(self.pool.clone()).list(Some(true))?;

        let mut total = SyncSummary::default();
        for account in accounts {
            let summary = self.sync_account(&account.id, now)?;
            total.posted += summary.posted;
            total.unposted += summary.unposted;
        }
        Ok(total)
    }

    /// Reclassifies one account's entries against the given date.
    ///
    /// Each flip contributes only the entry's own stored amount, so the
    /// final balance is independent of visit order and repeated syncs
    /// settle to the same state. VOID entries are never touched.
    pub fn sync_account(&self, account_id: &str, now: CampaignDate) -> Result<SyncSummary> {
        let mut conn = self.pool.get()?;

        conn.transaction::<SyncSummary, Error, _>(|tx| {
            let now_ts = chrono::Utc::now().naive_utc();

            // Pending entries that the clock has caught up with.
            let due: Vec<TransactionDB> = transactions::table
                .filter(transactions::account_id.eq(account_id))
                .filter(transactions::status.eq(STATUS_PENDING))
                .filter(
                    transactions::session_year.lt(now.year).or(transactions::session_year
                        .eq(now.year)
                        .and(transactions::session_day.le(now.day))),
                )
                .load::<TransactionDB>(tx)?;

            // Posted entries the clock has moved back across.
            let undone: Vec<TransactionDB> = transactions::table
                .filter(transactions::account_id.eq(account_id))
                .filter(transactions::status.eq(STATUS_POSTED))
                .filter(
                    transactions::session_year.gt(now.year).or(transactions::session_year
                        .eq(now.year)
                        .and(transactions::session_day.gt(now.day))),
                )
                .load::<TransactionDB>(tx)?;

            let mut delta = Decimal::ZERO;
            for row in &due {
                delta += parse_amount(&row.amount)?;
            }
            for row in &undone {
                delta -= parse_amount(&row.amount)?;
            }

            if !due.is_empty() {
                let ids: Vec<&String> = due.iter().map(|row| &row.id).collect();
                diesel::update(transactions::table.filter(transactions::id.eq_any(ids)))
                    .set((
                        transactions::status.eq(STATUS_POSTED),
                        transactions::updated_at.eq(now_ts),
                    ))
                    .execute(tx)?;
            }

            if !undone.is_empty() {
                let ids: Vec<&String> = undone.iter().map(|row| &row.id).collect();
                diesel::update(transactions::table.filter(transactions::id.eq_any(ids)))
                    .set((
                        transactions::status.eq(STATUS_PENDING),
                        transactions::updated_at.eq(now_ts),
                    ))
                    .execute(tx)?;
            }

            if delta != Decimal::ZERO {
                AccountRepository::apply_credit_delta(tx, account_id, delta)?;
            }

            debug!(
                "Synced account {} at {}: {} posted, {} unposted",
                account_id,
                now,
                due.len(),
                undone.len()
            );

            Ok(SyncSummary {
                posted: due.len(),
                unposted: undone.len(),
            })
        })
    }
}
