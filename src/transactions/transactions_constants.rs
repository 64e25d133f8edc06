// Persisted forms of the `TransactionStatus` variants.

/// Effective as of the campaign's current date; counted in the balance.
pub const STATUS_POSTED: &str = "POSTED";

/// Dated after the campaign's current date; persisted but not counted.
pub const STATUS_PENDING: &str = "PENDING";

/// Cancelled at creation time. Never counted and never reclassified.
pub const STATUS_VOID: &str = "VOID";

// Persisted discriminants of the `RelatedEntity` source pointer.

/// Entry generated from an income document (trade, contract, freight).
pub const RELATED_TYPE_INCOME: &str = "INCOME";

/// Entry generated from a cost document (maintenance, recurring charges).
pub const RELATED_TYPE_COST: &str = "COST";

/// Carry-forward entry written by the fiscal year closer; the id column
/// holds the sealed year.
pub const RELATED_TYPE_SNAPSHOT: &str = "SNAPSHOT";
