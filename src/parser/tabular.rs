use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::parser::assembler::HoldingAssembler;
use crate::parser::layout::{ColumnLayout, HEADER_LOOKAHEAD};
use crate::parser::{HoldingParser, InputMode, ParseError, ParseReport};

/// Parser for delimited text exports (CSV by default).
///
/// Title and metadata lines ahead of the header are skipped, up to `HEADER_LOOKAHEAD` records.
pub struct TabularParser {
    delimiter: u8
}

impl TabularParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for TabularParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl HoldingParser for TabularParser {
    fn parse(&self, content: &str) -> Result<ParseReport, ParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut assembler: Option<HoldingAssembler> = None;
        let mut scanned = 0;

        for result in reader.records() {
            if let Some(assembler) = assembler.as_mut() {
                match result {
                    Ok(record) => assembler.push(&record.iter().collect::<Vec<_>>()),
                    Err(error) => assembler.skip(format!("unreadable record ({error})"))
                }
                continue;
            }

            scanned += 1;

            if let Ok(record) = result {
                let cells: Vec<&str> = record.iter().collect();

                if let Some(layout) = ColumnLayout::detect(&cells) {
                    debug!("Found holdings header after {scanned} record(s): {layout:?}");
                    assembler = Some(HoldingAssembler::new(layout));
                    continue;
                }
            }

            if scanned >= HEADER_LOOKAHEAD {
                break;
            }
        }

        assembler
            .map(HoldingAssembler::finish)
            .ok_or(ParseError::HeaderNotFound { lookahead: HEADER_LOOKAHEAD })
    }

    fn mode(&self) -> InputMode {
        InputMode::Tabular
    }
}
