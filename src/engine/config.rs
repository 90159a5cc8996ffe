use std::path::PathBuf;

use crate::parser::InputMode;

pub const DEFAULT_TABULAR_INPUT: &str = "data/PortfolioWatchData.csv";
pub const DEFAULT_MARKUP_INPUT: &str = "data/Vanguard - Portfolio Analysis.html";
pub const DEFAULT_ASSET_MAP: &str = "Asset-Map.csv";
pub const DEFAULT_CLASS_MAP: &str = "Class-Map.csv";
pub const MAPPING_DELIMITER: u8 = b',';

/// Options of a single normalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Encoding of the export, selects the parser strategy.
    pub mode: InputMode,
    /// Fold CD and Treasury holdings into a single Fixed class.
    pub fixed_income_grouping: bool,
    /// Suppress per-row and per-mapping warnings. Fatal errors are always reported.
    pub quiet: bool,
    /// Field delimiter of tabular exports.
    pub delimiter: u8
}

impl PipelineConfig {
    /// Export read when no input path is given.
    pub fn default_input(&self) -> PathBuf {
        match self.mode {
            InputMode::Tabular => PathBuf::from(DEFAULT_TABULAR_INPUT),
            InputMode::Markup => PathBuf::from(DEFAULT_MARKUP_INPUT)
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Tabular,
            fixed_income_grouping: false,
            quiet: false,
            delimiter: b','
        }
    }
}
