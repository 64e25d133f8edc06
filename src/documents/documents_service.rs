use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::campaign::CampaignDate;
use crate::transactions::{
    LedgerServiceTrait, NewLedgerEntry, RelatedEntity, Transaction, TransactionStatus,
};
use crate::Result;

use super::documents_model::{CostDocument, Document, IncomeDocument};

/// One ledger entry an income document is scheduled to produce.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlannedEntry {
    pub amount: Decimal,
    pub description: String,
    pub date: CampaignDate,
}

/// Splits an income document into the entries it owes the ledger.
///
/// A positive signing deposit becomes its own entry at the signing date;
/// the balance (base + bonus - deposit) lands at the payment date when
/// that date exists and the balance is positive. Without a deposit the
/// whole amount waits for the payment date, so a signed-but-unpaid
/// document produces nothing.
pub(crate) fn income_schedule(doc: &IncomeDocument) -> Result<Vec<PlannedEntry>> {
    let base = doc.base_amount()?;
    let bonus = doc.bonus_amount()?;
    let deposit = doc.deposit_amount()?;
    let payment = doc.payment_date()?;

    let mut entries = Vec::new();

    match deposit {
        Some(dep) if dep > Decimal::ZERO => {
            entries.push(PlannedEntry {
                amount: dep,
                description: format!("{} (deposit)", doc.description),
                date: doc.signed_date(),
            });

            if let Some(due) = payment {
                let remainder = base + bonus - dep;
                if remainder > Decimal::ZERO {
                    entries.push(PlannedEntry {
                        amount: remainder,
                        description: format!("{} (balance)", doc.description),
                        date: due,
                    });
                }
            }
        }
        _ => {
            if let Some(due) = payment {
                entries.push(PlannedEntry {
                    amount: base + bonus,
                    description: doc.description.clone(),
                    date: due,
                });
            }
        }
    }

    Ok(entries)
}

// A document cancelled strictly before its payment date never pays out;
// its entries are created VOID so the audit row survives without a
// balance effect.
fn forced_status(
    cancel: Option<CampaignDate>,
    payment: Option<CampaignDate>,
) -> Option<TransactionStatus> {
    match (cancel, payment) {
        (Some(cancelled), Some(due)) if cancelled < due => Some(TransactionStatus::Void),
        _ => None,
    }
}

/// Bridges source financial documents to the ledger.
///
/// The layer that owns document mutation calls `document_created` /
/// `document_updated` explicitly; there are no persistence hooks.
pub struct DocumentBridge {
    ledger: Arc<dyn LedgerServiceTrait>,
}

impl DocumentBridge {
    /// Creates a new DocumentBridge instance
    pub fn new(ledger: Arc<dyn LedgerServiceTrait>) -> Self {
        Self { ledger }
    }

    /// Reacts to a freshly created document by writing its ledger entries
    pub fn document_created(&self, doc: &Document) -> Result<Vec<Transaction>> {
        match doc {
            Document::Income(income) => self.apply_income(income),
            Document::Cost(cost) => self.apply_cost(cost),
        }
    }

    /// Reacts to a document edit: reverse whatever the document produced
    /// before, then reapply against its current field values. Safe to
    /// repeat any number of times.
    pub fn document_updated(&self, doc: &Document) -> Result<Vec<Transaction>> {
        let pointer = Self::pointer_for(doc);
        let reversed = self.ledger.reverse(&pointer)?;
        debug!(
            "Reversed {} entries before reapplying document {}",
            reversed,
            doc.id()
        );
        self.document_created(doc)
    }

    fn pointer_for(doc: &Document) -> RelatedEntity {
        match doc {
            Document::Income(income) => RelatedEntity::Income(income.id.clone()),
            Document::Cost(cost) => RelatedEntity::Cost(cost.id.clone()),
        }
    }

    fn apply_income(&self, doc: &IncomeDocument) -> Result<Vec<Transaction>> {
        doc.validate()?;

        let forced = forced_status(doc.cancel_date()?, doc.payment_date()?);
        let mut created = Vec::new();

        for planned in income_schedule(doc)? {
            let entry = NewLedgerEntry {
                account_id: doc.account_id.clone(),
                amount: planned.amount,
                description: planned.description,
                session_day: planned.date.day,
                session_year: planned.date.year,
                related: Some(RelatedEntity::Income(doc.id.clone())),
                forced_status: forced,
            };
            created.push(self.ledger.deposit(entry)?);
        }

        Ok(created)
    }

    fn apply_cost(&self, doc: &CostDocument) -> Result<Vec<Transaction>> {
        doc.validate()?;

        let due = doc.due_date();
        let forced = forced_status(doc.cancel_date()?, Some(due));

        let entry = NewLedgerEntry {
            account_id: doc.account_id.clone(),
            amount: doc.cost_amount()?,
            description: doc.description.clone(),
            session_day: due.day,
            session_year: due.year,
            related: Some(RelatedEntity::Cost(doc.id.clone())),
            forced_status: forced,
        };

        Ok(vec![self.ledger.withdraw(entry)?])
    }
}
