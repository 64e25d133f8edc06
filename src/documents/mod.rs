pub(crate) mod documents_model;
pub(crate) mod documents_service;
pub(crate) mod documents_traits;

pub use documents_model::{CostDocument, Document, IncomeDocument};
pub use documents_service::DocumentBridge;
pub use documents_traits::RecurringDocumentProducer;
