use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::transactions::transactions_model::parse_amount;
use crate::transactions::{RelatedEntity, TransactionDB, TransactionStatus};

use super::fiscal_errors::{FiscalYearError, Result};

/// Immutable copy of a ledger entry written when its year is sealed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedTransaction {
    pub id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub description: String,
    pub session_day: i32,
    pub session_year: i32,
    pub status: TransactionStatus,
    pub related: Option<RelatedEntity>,
    pub archived_at: NaiveDateTime,
}

/// Summary of a completed fiscal year closure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYearClose {
    pub account_id: String,
    pub year: i32,
    pub archived_count: usize,
    pub carried_forward: Decimal,
    pub snapshot_id: String,
}

/// Database model for archived entries
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transaction_archive)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionArchiveDB {
    pub id: String,
    pub account_id: String,
    pub amount: String,
    pub description: String,
    pub session_day: i32,
    pub session_year: i32,
    pub status: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub archived_at: NaiveDateTime,
}

impl TransactionArchiveDB {
    /// Copies an active row into its archive form, keeping the original id
    pub fn from_active(row: &TransactionDB, archived_at: NaiveDateTime) -> Self {
        Self {
            id: row.id.clone(),
            account_id: row.account_id.clone(),
            amount: row.amount.clone(),
            description: row.description.clone(),
            session_day: row.session_day,
            session_year: row.session_year,
            status: row.status.clone(),
            related_entity_type: row.related_entity_type.clone(),
            related_entity_id: row.related_entity_id.clone(),
            archived_at,
        }
    }
}

impl TryFrom<TransactionArchiveDB> for ArchivedTransaction {
    type Error = FiscalYearError;

    fn try_from(db: TransactionArchiveDB) -> Result<Self> {
        let amount = parse_amount(&db.amount)
            .map_err(|e| FiscalYearError::InvalidData(e.to_string()))?;
        let status = TransactionStatus::from_str(&db.status)
            .map_err(|e| FiscalYearError::InvalidData(e.to_string()))?;
        let related =
            RelatedEntity::from_columns(db.related_entity_type, db.related_entity_id)
                .map_err(|e| FiscalYearError::InvalidData(e.to_string()))?;

        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            amount,
            description: db.description,
            session_day: db.session_day,
            session_year: db.session_year,
            status,
            related,
            archived_at: db.archived_at,
        })
    }
}
