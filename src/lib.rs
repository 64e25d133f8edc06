pub mod db;

pub mod accounts;
pub mod campaign;
pub mod documents;
pub mod errors;
pub mod fiscal;
pub mod schema;
pub mod transactions;

pub use errors::{Error, Result};
pub use transactions::*;
