mod diagnostic;
mod holding;
mod row;

pub use diagnostic::Diagnostic;
pub use holding::RawHolding;
pub use row::NormalizedRow;
