use super::documents_model::Document;
use crate::campaign::CampaignDate;
use crate::Result;

/// Producer of automated recurring documents (berthing fees, loan payments,
/// crew salaries and the like).
///
/// Invoked with the new campaign date before the sync pass so that moving
/// the clock forward surfaces the charges that became due. The procedural
/// generator behind it is an external collaborator.
pub trait RecurringDocumentProducer: Send + Sync {
    fn documents_due(&self, up_to: CampaignDate) -> Result<Vec<Document>>;
}
