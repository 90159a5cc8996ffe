use scraper::{ElementRef, Html};
use tracing::debug;

use crate::parser::assembler::HoldingAssembler;
use crate::parser::layout::{ColumnLayout, HEADER_LOOKAHEAD};
use crate::parser::{HoldingParser, InputMode, ParseError, ParseReport};

/// Parser for a saved portfolio web page.
///
/// The page may carry any number of tables. The holdings table is the first one with a
/// recognizable header, wherever it sits on the page.
#[derive(Default)]
pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        Self
    }
}

impl HoldingParser for MarkupParser {
    fn parse(&self, content: &str) -> Result<ParseReport, ParseError> {
        let document = Html::parse_document(content);
        let mut tables = 0;

        for table in elements(document.root_element(), "table") {
            tables += 1;

            let rows: Vec<Vec<String>> = elements(table, "tr").map(row_cells).collect();

            let header = rows
                .iter()
                .take(HEADER_LOOKAHEAD)
                .enumerate()
                .find_map(|(position, cells)| ColumnLayout::detect(cells).map(|layout| (position, layout)));

            let Some((position, layout)) = header else {
                debug!("Table [{tables}] has no holdings header, moving on");
                continue;
            };

            debug!("Found holdings header in table [{tables}] at row [{position}]: {layout:?}");

            let mut assembler = HoldingAssembler::new(layout);

            for cells in &rows[position + 1..] {
                assembler.push(cells);
            }

            return Ok(assembler.finish());
        }

        Err(ParseError::TableNotFound { tables })
    }

    fn mode(&self) -> InputMode {
        InputMode::Markup
    }
}

fn elements<'a>(root: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |element| element.value().name() == name)
}

//NOTE: Only direct cells are taken so a table nested inside a cell does not shift the columns.
//NOTE: Text nodes are joined with a space so <br> and block children still separate words
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| cell.text().collect::<Vec<_>>().join(" "))
        .collect()
}
