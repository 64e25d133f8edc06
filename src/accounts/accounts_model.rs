use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::accounts_errors::{AccountError, Result};

/// Domain model representing one asset's financial account.
///
/// `credits` is the cached balance: the sum of the amounts of all POSTED
/// transactions currently attached to the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAccount {
    pub id: String,
    pub name: String,
    pub credits: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub is_active: bool,
}

impl NewAccount {
    /// Validates the new account data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for accounts
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub credits: String,
    pub is_active: bool,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
    #[diesel(skip_insertion)]
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl TryFrom<AccountDB> for FinancialAccount {
    type Error = AccountError;

    fn try_from(db: AccountDB) -> Result<Self> {
        let credits = Decimal::from_str(&db.credits).map_err(|e| {
            AccountError::InvalidData(format!(
                "Stored balance for account {} is not a decimal: {}",
                db.id, e
            ))
        })?;

        Ok(Self {
            id: db.id,
            name: db.name,
            credits,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            credits: Decimal::ZERO.to_string(),
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
