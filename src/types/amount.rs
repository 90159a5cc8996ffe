use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];
const PLACEHOLDERS: [&str; 5] = ["-", "--", "n/a", "na", "none"];

/// Parses a money or quantity cell as exported by a brokerage.
///
/// Currency symbols, thousands separators and inner whitespace are stripped before the
/// decimal parse. An accounting style value wrapped in parentheses is negative.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::Blank);
    }

    if PLACEHOLDERS.iter().any(|placeholder| value.eq_ignore_ascii_case(placeholder)) {
        return Err(AmountError::Placeholder(value.to_string()));
    }

    let (negated, inner) = match value.strip_prefix('(').and_then(|inner| inner.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, value)
    };

    let cleaned: String = inner
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    //NOTE: Decimal::from_str tolerates underscores, exports never contain them so they are treated as garbage
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return Err(AmountError::NotNumeric(value.to_string()));
    }

    let amount = Decimal::from_str(unsigned)
        .map_err(|_| AmountError::NotNumeric(value.to_string()))?;

    Ok(if negated { -amount } else { amount })
}

/// Parses an optional column such as a share count. Anything unparseable is treated as absent.
pub fn parse_optional_amount(value: &str) -> Option<Decimal> {
    parse_amount(value).ok()
}
