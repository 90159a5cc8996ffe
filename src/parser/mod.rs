mod assembler;
mod errors;
mod layout;
mod markup;
mod tabular;

use clap::ValueEnum;

use crate::models::{Diagnostic, RawHolding};

pub use errors::ParseError;
pub use layout::HEADER_LOOKAHEAD;
pub use markup::MarkupParser;
pub use tabular::TabularParser;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding of the portfolio export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputMode {
    /// Delimited text export with a header row.
    #[default]
    #[value(alias = "csv")]
    Tabular,
    /// Saved web page holding the positions in an HTML table.
    #[value(alias = "html")]
    Markup
}

impl InputMode {
    /// Builds the parser strategy for this mode.
    pub fn parser(self, delimiter: u8) -> Box<dyn HoldingParser> {
        match self {
            InputMode::Tabular => Box::new(TabularParser::new(delimiter)),
            InputMode::Markup => Box::new(MarkupParser::new())
        }
    }
}

/// Everything a parser recovered from an export.
///
/// `holdings` are in source order. Rows that could not be used are reported in
/// `diagnostics` instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub holdings: Vec<RawHolding>,
    pub diagnostics: Vec<Diagnostic>
}

/// A strategy turning one export encoding into raw holdings.
///
/// Implementations must yield identical holdings for equivalent source data, whatever
/// the encoding.
pub trait HoldingParser {
    /// Parses decoded export content.
    ///
    /// # Errors
    /// Returns `ParseError` when the holdings table cannot be located. A structural
    /// failure never produces partial output.
    fn parse(&self, content: &str) -> Result<ParseReport, ParseError>;

    fn mode(&self) -> InputMode;
}

/// Decodes raw export bytes as UTF-8, dropping a leading byte order mark.
pub fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    std::str::from_utf8(bytes).map_err(|error| ParseError::Encoding { valid_up_to: error.valid_up_to() })
}
