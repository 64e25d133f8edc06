use super::transactions_errors::Result;
use super::transactions_model::{NewLedgerEntry, RelatedEntity, Transaction};

/// Trait defining the contract for ledger write operations.
///
/// The document bridge is programmed against this so its splitting logic
/// can be tested with a recording mock.
pub trait LedgerServiceTrait: Send + Sync {
    /// Records an entry with the amount as given
    fn deposit(&self, entry: NewLedgerEntry) -> Result<Transaction>;

    /// Records an entry with the amount negated
    fn withdraw(&self, entry: NewLedgerEntry) -> Result<Transaction>;

    /// Removes every active entry carrying the pointer, undoing posted
    /// balance effects; returns how many entries were removed
    fn reverse(&self, related: &RelatedEntity) -> Result<usize>;
}
