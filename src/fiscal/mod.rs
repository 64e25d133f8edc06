pub(crate) mod fiscal_errors;
pub(crate) mod fiscal_model;
pub(crate) mod fiscal_service;

pub use fiscal_errors::FiscalYearError;
pub use fiscal_model::{ArchivedTransaction, FiscalYearClose, TransactionArchiveDB};
pub use fiscal_service::FiscalYearService;
