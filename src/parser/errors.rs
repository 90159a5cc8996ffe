use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Format error: no holdings header found within the first {lookahead} rows")]
    HeaderNotFound {
        lookahead: usize
    },
    #[error("Format error: none of the {tables} tables in the page has a holdings header")]
    TableNotFound {
        tables: usize
    },
    #[error("Encoding error: input is not valid UTF-8 (invalid byte at offset {valid_up_to})")]
    Encoding {
        valid_up_to: usize
    }
}
