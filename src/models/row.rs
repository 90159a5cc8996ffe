use rust_decimal::Decimal;
use serde::Serialize;

/// One line of the normalized report.
///
/// Field order is the column order of the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    pub account: String,
    pub asset_name: String,
    pub asset_class: String,
    pub quantity: Option<Decimal>,
    pub market_value: Decimal
}
