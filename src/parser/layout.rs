/// How many rows are scanned for the header before the input is rejected.
pub const HEADER_LOOKAHEAD: usize = 25;

const ACCOUNT_HEADERS: &[&str] = &["account name", "account", "account number", "account #"];
const SYMBOL_HEADERS: &[&str] = &["symbol", "ticker"];
const DESCRIPTION_HEADERS: &[&str] = &[
    "fund name",
    "name",
    "investment name",
    "description",
    "security description",
    "investment"
];
const QUANTITY_HEADERS: &[&str] = &["shares", "quantity", "qty"];
const VALUE_HEADERS: &[&str] = &["value", "market value", "current value", "total value", "current balance"];

/// Column positions of the holdings table, discovered from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub account: Option<usize>,
    pub symbol: Option<usize>,
    pub description: Option<usize>,
    pub quantity: Option<usize>,
    pub value: usize
}

impl ColumnLayout {
    /// Recognizes a header row.
    ///
    /// A header needs a value column and at least one of the symbol or description
    /// columns. Everything else is optional.
    pub fn detect<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        let normalized: Vec<String> = cells.iter().map(|cell| normalize_header(cell.as_ref())).collect();
        let find = |variants: &[&str]| normalized.iter().position(|cell| variants.contains(&cell.as_str()));

        let value = find(VALUE_HEADERS)?;
        let symbol = find(SYMBOL_HEADERS);
        let description = find(DESCRIPTION_HEADERS);

        if symbol.is_none() && description.is_none() {
            return None;
        }

        Some(Self {
            account: find(ACCOUNT_HEADERS),
            symbol,
            description,
            quantity: find(QUANTITY_HEADERS),
            value
        })
    }

    /// Whether a lone first cell with no value can name the account of the rows beneath it.
    ///
    /// In the symbol or description column such a cell is a holding without a value instead.
    pub fn opens_section(&self) -> bool {
        match self.account {
            Some(column) => column == 0,
            None => self.symbol != Some(0) && self.description != Some(0)
        }
    }
}

/// Trims a cell and collapses inner runs of whitespace (non-breaking spaces included).
pub fn clean_cell(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_header(cell: &str) -> String {
    clean_cell(cell).trim_end_matches(':').to_lowercase()
}

pub fn is_summary_label(cell: &str) -> bool {
    let cell = cell.trim_end_matches(':');

    ["total", "subtotal", "grand total"].iter().any(|summary| cell.eq_ignore_ascii_case(summary))
}
