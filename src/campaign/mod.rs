pub(crate) mod campaign_model;
pub(crate) mod campaign_repository;
pub(crate) mod campaign_service;
pub(crate) mod campaign_traits;

pub use campaign_model::{CampaignClockDB, CampaignDate, ClockChange, SyncSummary};
pub use campaign_repository::CampaignRepository;
pub use campaign_service::CampaignService;
pub use campaign_traits::ClockProvider;
