pub(crate) mod transactions_constants;
pub(crate) mod transactions_errors;
pub(crate) mod transactions_model;
pub(crate) mod transactions_repository;
pub(crate) mod transactions_service;
pub(crate) mod transactions_traits;

pub use transactions_constants::*;
pub use transactions_errors::LedgerError;
pub use transactions_model::{
    NewLedgerEntry, RelatedEntity, Transaction, TransactionDB, TransactionStatus,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::{derive_status, LedgerService};
pub use transactions_traits::LedgerServiceTrait;
