use tracing::debug;

use crate::models::{Diagnostic, RawHolding};
use crate::parser::layout::{clean_cell, is_summary_label, ColumnLayout};
use crate::parser::ParseReport;
use crate::types::{parse_amount, parse_optional_amount, RowIndex};

/// Turns the data rows beneath a header into holdings.
///
/// Shared by every input strategy so that equivalent tables produce equal holdings.
pub struct HoldingAssembler {
    layout: ColumnLayout,
    current_account: String,
    next_index: RowIndex,
    report: ParseReport
}

impl HoldingAssembler {
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout,
            current_account: String::new(),
            next_index: 0,
            report: ParseReport::default()
        }
    }

    /// Consumes one data row. Blank rows are ignored and take no index.
    pub fn push<S: AsRef<str>>(&mut self, cells: &[S]) {
        let cells: Vec<String> = cells.iter().map(|cell| clean_cell(cell.as_ref())).collect();

        if cells.iter().all(String::is_empty) {
            return;
        }

        let row = self.take_index();

        if ColumnLayout::detect(&cells).is_some() {
            debug!("Row [{row}] repeats the header, ignoring it");
            return;
        }

        if cells.iter().any(|cell| is_summary_label(cell)) {
            debug!("Row [{row}] is a summary line, ignoring it");
            return;
        }

        let value = self.cell(&cells, Some(self.layout.value)).unwrap_or_default();

        if value.is_empty() && self.layout.opens_section() && cells.iter().skip(1).all(String::is_empty) {
            if let Some(heading) = cells.first() {
                debug!("Row [{row}] opens the section for account [{heading}]");
                self.current_account = heading.clone();
                return;
            }
        }

        let symbol = self.cell(&cells, self.layout.symbol);
        let description = self.cell(&cells, self.layout.description);

        let Some(label) = symbol.or(description) else {
            self.skip_row(row, "no symbol or description".to_string());
            return;
        };

        let market_value = match parse_amount(value) {
            Ok(market_value) => market_value,
            Err(error) => {
                self.skip_row(row, format!("market value of [{label}] is unusable ({error})"));
                return;
            }
        };

        if let Some(account) = self.cell(&cells, self.layout.account) {
            self.current_account = account.to_string();
        }

        let holding = RawHolding {
            account: self.current_account.clone(),
            label: label.to_string(),
            description: symbol.and(description).map(str::to_string),
            quantity: self.cell(&cells, self.layout.quantity).and_then(parse_optional_amount),
            market_value,
            source_row_index: row
        };

        self.report.holdings.push(holding);
    }

    /// Records a row the reader could not even split into cells.
    pub fn skip(&mut self, reason: String) {
        let row = self.take_index();
        self.skip_row(row, reason);
    }

    pub fn finish(self) -> ParseReport {
        self.report
    }

    fn take_index(&mut self) -> RowIndex {
        let row = self.next_index;
        self.next_index += 1;
        row
    }

    fn skip_row(&mut self, row: RowIndex, reason: String) {
        self.report.diagnostics.push(Diagnostic::RowSkipped { row, reason });
    }

    fn cell<'a>(&self, cells: &'a [String], index: Option<usize>) -> Option<&'a str> {
        index
            .and_then(|index| cells.get(index))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }
}
