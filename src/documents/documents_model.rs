use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::campaign::CampaignDate;
use crate::errors::{Error, Result, ValidationError};

/// Source financial document for money coming in (trade, contract, freight).
///
/// Monetary fields arrive as decimal strings from the document producer and
/// are parsed at this edge; the core never validates their business meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDocument {
    pub id: String,
    pub account_id: String,
    pub description: String,
    /// Base amount due at the payment date
    pub amount: String,
    /// Optional bonus paid on top of the base amount
    pub bonus: Option<String>,
    /// Optional deposit due at the signing date
    pub deposit: Option<String>,
    pub signed_day: i32,
    pub signed_year: i32,
    pub payment_day: Option<i32>,
    pub payment_year: Option<i32>,
    pub cancel_day: Option<i32>,
    pub cancel_year: Option<i32>,
}

/// Source financial document for money going out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostDocument {
    pub id: String,
    pub account_id: String,
    pub description: String,
    pub amount: String,
    pub due_day: i32,
    pub due_year: i32,
    pub cancel_day: Option<i32>,
    pub cancel_year: Option<i32>,
}

/// A source document as handed to the bridge by the producing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Document {
    Income(IncomeDocument),
    Cost(CostDocument),
}

fn parse_decimal(raw: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|e| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Field '{}' is not a decimal ('{}'): {}",
            field, raw, e
        )))
    })
}

fn optional_date(day: Option<i32>, year: Option<i32>, field: &str) -> Result<Option<CampaignDate>> {
    match (day, year) {
        (None, None) => Ok(None),
        (Some(d), Some(y)) => Ok(Some(CampaignDate::new(d, y))),
        _ => Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        ))),
    }
}

impl IncomeDocument {
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID cannot be empty".to_string(),
            )));
        }
        self.base_amount()?;
        self.bonus_amount()?;
        self.deposit_amount()?;
        self.payment_date()?;
        self.cancel_date()?;
        Ok(())
    }

    pub fn base_amount(&self) -> Result<Decimal> {
        parse_decimal(&self.amount, "amount")
    }

    pub fn bonus_amount(&self) -> Result<Decimal> {
        match &self.bonus {
            Some(raw) => parse_decimal(raw, "bonus"),
            None => Ok(Decimal::ZERO),
        }
    }

    pub fn deposit_amount(&self) -> Result<Option<Decimal>> {
        match &self.deposit {
            Some(raw) => Ok(Some(parse_decimal(raw, "deposit")?)),
            None => Ok(None),
        }
    }

    pub fn signed_date(&self) -> CampaignDate {
        CampaignDate::new(self.signed_day, self.signed_year)
    }

    pub fn payment_date(&self) -> Result<Option<CampaignDate>> {
        optional_date(self.payment_day, self.payment_year, "paymentYear")
    }

    pub fn cancel_date(&self) -> Result<Option<CampaignDate>> {
        optional_date(self.cancel_day, self.cancel_year, "cancelYear")
    }
}

impl CostDocument {
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID cannot be empty".to_string(),
            )));
        }
        self.cost_amount()?;
        self.cancel_date()?;
        Ok(())
    }

    pub fn cost_amount(&self) -> Result<Decimal> {
        parse_decimal(&self.amount, "amount")
    }

    pub fn due_date(&self) -> CampaignDate {
        CampaignDate::new(self.due_day, self.due_year)
    }

    pub fn cancel_date(&self) -> Result<Option<CampaignDate>> {
        optional_date(self.cancel_day, self.cancel_year, "cancelYear")
    }
}

impl Document {
    pub fn id(&self) -> &str {
        match self {
            Document::Income(doc) => &doc.id,
            Document::Cost(doc) => &doc.id,
        }
    }

    pub fn account_id(&self) -> &str {
        match self {
            Document::Income(doc) => &doc.account_id,
            Document::Cost(doc) => &doc.account_id,
        }
    }
}
