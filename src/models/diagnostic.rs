use std::fmt;
use std::fmt::{Display, Formatter};

use crate::types::RowIndex;

/// A non-fatal event raised while processing a run.
///
/// Diagnostics never abort the run and never change the exit status. They are surfaced
/// as warnings unless quiet mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    RowSkipped {
        row: RowIndex,
        reason: String
    },
    UnmappedAsset {
        label: String,
        asset_name: String
    },
    MalformedMapping {
        file: String,
        line: u64,
        reason: String
    },
    DuplicateMapping {
        file: String,
        line: u64,
        key: String
    }
}

impl Display for Diagnostic {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RowSkipped { row, reason } => {
                write!(formatter, "Skipped row [{row}]: {reason}")
            }
            Diagnostic::UnmappedAsset { label, asset_name } if label == asset_name => {
                write!(formatter, "No class found for asset [{label}], add it to the class map")
            }
            Diagnostic::UnmappedAsset { label, asset_name } => {
                write!(formatter, "No class found for asset [{asset_name}] (label [{label}]), add it to the class map")
            }
            Diagnostic::MalformedMapping { file, line, reason } => {
                write!(formatter, "Ignoring malformed entry in [{file}] at line [{line}]: {reason}")
            }
            Diagnostic::DuplicateMapping { file, line, key } => {
                write!(formatter, "Ignoring duplicate entry [{key}] in [{file}] at line [{line}], the first entry wins")
            }
        }
    }
}
