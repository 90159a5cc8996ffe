use rust_decimal::Decimal;

use crate::types::RowIndex;

/// A single holding as it was found in the export, before classification.
///
/// Both input strategies produce this shape. `quantity` is optional because cash and
/// sweep lines usually carry only a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHolding {
    /// Brokerage account (or account group) the position sits in.
    pub account: String,
    /// Ticker symbol, or the description when the export has no symbol for the line.
    pub label: String,
    /// Fund or security name when the export carries one next to the symbol.
    pub description: Option<String>,
    /// Number of shares or units held.
    pub quantity: Option<Decimal>,
    /// Current market value of the position.
    pub market_value: Decimal,
    /// Ordinal of the row beneath the header, skipped rows included.
    pub source_row_index: RowIndex
}

impl RawHolding {
    /// Text the classification heuristics look at, most specific first.
    pub fn heuristic_texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str())
            .chain(self.description.as_deref().filter(|description| *description != self.label))
    }
}
