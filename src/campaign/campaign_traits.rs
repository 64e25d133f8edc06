use super::campaign_model::CampaignDate;
use crate::Result;

/// Trait exposing the campaign's current date.
///
/// The ledger consults it to decide whether a new transaction is already
/// effective.
pub trait ClockProvider: Send + Sync {
    fn current_date(&self) -> Result<CampaignDate>;
}
