use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::accounts::{AccountError, Result};
use crate::db::{get_connection, DbPool};
use crate::schema::accounts;

use super::accounts_model::{AccountDB, FinancialAccount, NewAccount};

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Creates a new account with a zero balance
    pub fn create(&self, new_account: NewAccount) -> Result<FinancialAccount> {
        new_account.validate()?;

        let mut account_db: AccountDB = new_account.into();
        if account_db.id.is_empty() {
            account_db.id = uuid::Uuid::new_v4().to_string();
        }

        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        diesel::insert_into(accounts::table)
            .values(&account_db)
            .get_result::<AccountDB>(&mut conn)
            .map_err(AccountError::from)?
            .try_into()
    }

    /// Retrieves an account by its ID
    pub fn get_by_id(&self, account_id: &str) -> Result<FinancialAccount> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        accounts::table
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?
            .try_into()
    }

    /// Lists accounts, optionally filtering by active status
    pub fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<FinancialAccount>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        let mut query = accounts::table.into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(active));
        }

        query
            .order((accounts::is_active.desc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(FinancialAccount::try_from)
            .collect()
    }

    /// Flips the active flag on an account.
    ///
    /// Sync passes visit only active accounts, so an account reactivated
    /// after clock movement carries stale statuses; callers must follow
    /// reactivation with a `CampaignService::sync_account` pass.
    pub fn set_active(&self, account_id: &str, active: bool) -> Result<FinancialAccount> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        diesel::update(accounts::table.find(account_id))
            .set((
                accounts::is_active.eq(active),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<AccountDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?
            .try_into()
    }

    /// Applies a balance delta to an account inside the caller's transaction.
    ///
    /// Takes the raw connection so that ledger writes and their balance
    /// effect commit atomically. Returns the updated balance.
    pub fn apply_credit_delta(
        conn: &mut SqliteConnection,
        account_id: &str,
        delta: Decimal,
    ) -> Result<Decimal> {
        let raw: String = accounts::table
            .find(account_id)
            .select(accounts::credits)
            .first(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;

        let balance = Decimal::from_str(&raw).map_err(|e| {
            AccountError::InvalidData(format!(
                "Stored balance for account {} is not a decimal: {}",
                account_id, e
            ))
        })?;

        let updated = balance + delta;

        diesel::update(accounts::table.find(account_id))
            .set((
                accounts::credits.eq(updated.to_string()),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(updated)
    }
}
