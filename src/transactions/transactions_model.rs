use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::campaign::CampaignDate;
use crate::transactions::transactions_constants::*;
use crate::transactions::transactions_errors::{LedgerError, Result};

/// Status of a ledger entry relative to the campaign's current date.
///
/// PENDING and POSTED exchange with each other as the clock moves; VOID is
/// assigned only at creation and never transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Posted,
    Void,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => STATUS_PENDING,
            TransactionStatus::Posted => STATUS_POSTED,
            TransactionStatus::Void => STATUS_VOID,
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            s if s == STATUS_PENDING => Ok(TransactionStatus::Pending),
            s if s == STATUS_POSTED => Ok(TransactionStatus::Posted),
            s if s == STATUS_VOID => Ok(TransactionStatus::Void),
            _ => Err(LedgerError::InvalidData(format!(
                "Unknown transaction status: {}",
                s
            ))),
        }
    }
}

/// Back-reference from a ledger entry to the document that produced it.
///
/// Persisted as a (type, id) column pair; the variant is the document kind,
/// so reversal never needs string dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelatedEntity {
    Income(String),
    Cost(String),
    Snapshot(i32),
}

impl RelatedEntity {
    pub fn entity_type(&self) -> &'static str {
        match self {
            RelatedEntity::Income(_) => RELATED_TYPE_INCOME,
            RelatedEntity::Cost(_) => RELATED_TYPE_COST,
            RelatedEntity::Snapshot(_) => RELATED_TYPE_SNAPSHOT,
        }
    }

    pub fn entity_id(&self) -> String {
        match self {
            RelatedEntity::Income(id) | RelatedEntity::Cost(id) => id.clone(),
            RelatedEntity::Snapshot(year) => year.to_string(),
        }
    }

    /// Rebuilds the pointer from its persisted column pair
    pub fn from_columns(
        entity_type: Option<String>,
        entity_id: Option<String>,
    ) -> Result<Option<Self>> {
        match (entity_type, entity_id) {
            (None, None) => Ok(None),
            (Some(t), Some(id)) => match t.as_str() {
                RELATED_TYPE_INCOME => Ok(Some(RelatedEntity::Income(id))),
                RELATED_TYPE_COST => Ok(Some(RelatedEntity::Cost(id))),
                RELATED_TYPE_SNAPSHOT => {
                    let year = id.parse::<i32>().map_err(|_| {
                        LedgerError::InvalidData(format!(
                            "Snapshot pointer id '{}' is not a year",
                            id
                        ))
                    })?;
                    Ok(Some(RelatedEntity::Snapshot(year)))
                }
                _ => Err(LedgerError::InvalidData(format!(
                    "Unknown related entity type: {}",
                    t
                ))),
            },
            _ => Err(LedgerError::InvalidData(
                "Related entity type and id must be set together".to_string(),
            )),
        }
    }
}

/// Domain model representing a ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub description: String,
    pub session_day: i32,
    pub session_year: i32,
    pub status: TransactionStatus,
    pub related: Option<RelatedEntity>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// The campaign-calendar date at which this entry takes effect
    pub fn effective_date(&self) -> CampaignDate {
        CampaignDate::new(self.session_day, self.session_year)
    }
}

/// Input model for creating a new ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub account_id: String,
    pub amount: Decimal,
    pub description: String,
    pub session_day: i32,
    pub session_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_status: Option<TransactionStatus>,
}

impl NewLedgerEntry {
    /// Validates the new entry data
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(LedgerError::InvalidData(
                "Account ID cannot be empty".to_string(),
            ));
        }
        if self.session_day < 1 {
            return Err(LedgerError::InvalidData(format!(
                "Session day must be positive, got {}",
                self.session_day
            )));
        }
        Ok(())
    }

    pub fn effective_date(&self) -> CampaignDate {
        CampaignDate::new(self.session_day, self.session_year)
    }
}

/// Database model for ledger entries
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub account_id: String,
    pub amount: String,
    pub description: String,
    pub session_day: i32,
    pub session_year: i32,
    pub status: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TransactionDB {
    /// Builds the row for a new entry with the status the service derived
    pub fn from_entry(entry: &NewLedgerEntry, status: TransactionStatus) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: entry.account_id.clone(),
            amount: entry.amount.to_string(),
            description: entry.description.clone(),
            session_day: entry.session_day,
            session_year: entry.session_year,
            status: status.as_str().to_string(),
            related_entity_type: entry.related.as_ref().map(|r| r.entity_type().to_string()),
            related_entity_id: entry.related.as_ref().map(|r| r.entity_id()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Parses a persisted amount column back into an exact decimal
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| LedgerError::InvalidData(format!("Stored amount '{}' is not a decimal: {}", raw, e)))
}

// Conversion implementations
impl TryFrom<TransactionDB> for Transaction {
    type Error = LedgerError;

    fn try_from(db: TransactionDB) -> Result<Self> {
        let amount = parse_amount(&db.amount)?;
        let status = TransactionStatus::from_str(&db.status)?;
        let related = RelatedEntity::from_columns(db.related_entity_type, db.related_entity_id)?;

        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            amount,
            description: db.description,
            session_day: db.session_day,
            session_year: db.session_year,
            status,
            related,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_entity_round_trips_through_columns() {
        let income = RelatedEntity::Income("doc-42".to_string());
        let rebuilt = RelatedEntity::from_columns(
            Some(income.entity_type().to_string()),
            Some(income.entity_id()),
        )
        .unwrap();
        assert_eq!(rebuilt, Some(income));

        let snapshot = RelatedEntity::Snapshot(1105);
        assert_eq!(snapshot.entity_id(), "1105");
        let rebuilt = RelatedEntity::from_columns(
            Some(RELATED_TYPE_SNAPSHOT.to_string()),
            Some("1105".to_string()),
        )
        .unwrap();
        assert_eq!(rebuilt, Some(snapshot));
    }

    #[test]
    fn half_set_pointer_is_rejected() {
        let result =
            RelatedEntity::from_columns(Some(RELATED_TYPE_INCOME.to_string()), None);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(TransactionStatus::from_str("SETTLED").is_err());
        assert_eq!(
            TransactionStatus::from_str("POSTED").unwrap(),
            TransactionStatus::Posted
        );
    }
}
