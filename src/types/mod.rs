mod amount;
mod errors;

pub use amount::{parse_amount, parse_optional_amount};
pub use errors::AmountError;

/// Position of a data row beneath the header of the holdings table.
pub type RowIndex = usize;
