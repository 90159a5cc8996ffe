use std::io;

use thiserror::Error;

use crate::classifier::MappingError;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("Output error: invalid date format '{0}'")]
    DateFormat(String),
    #[error("Output error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Output error: {0}")]
    Io(#[from] io::Error)
}
