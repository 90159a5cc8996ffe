use std::io;

use thiserror::Error;

/// A mapping file that cannot be used at all. Individual bad lines are diagnostics instead.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Config error: mapping file [{file}] could not be opened: {error}")]
    Io {
        file: String,
        #[source]
        error: io::Error
    },
    #[error("Config error: mapping file [{file}] is not valid UTF-8 (invalid byte at offset {valid_up_to})")]
    Encoding {
        file: String,
        valid_up_to: usize
    },
    #[error("Config error: mapping file [{file}] could not be read: {error}")]
    Read {
        file: String,
        #[source]
        error: csv::Error
    }
}
