use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::classifier::{ClassSource, Classification, Classifier};
use crate::engine::{PipelineConfig, PipelineError};
use crate::models::{Diagnostic, NormalizedRow};
use crate::normalizer::RowNormalizer;
use crate::parser::decode;

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Report rows in export order.
    pub rows: Vec<NormalizedRow>,
    /// Everything that was skipped or fell back to a default along the way.
    pub diagnostics: Vec<Diagnostic>
}

impl PipelineOutput {
    /// Canonical names of the assets no class could be found for, in order of appearance.
    pub fn unmapped_assets(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter_map(|diagnostic| match diagnostic {
                Diagnostic::UnmappedAsset { asset_name, .. } => Some(asset_name.as_str()),
                _ => None
            })
            .collect()
    }
}

/// Parses an export, classifies every holding and normalizes the result.
pub struct Pipeline {
    config: PipelineConfig,
    classifier: Classifier,
    normalizer: RowNormalizer
}

impl Pipeline {
    pub fn new(config: PipelineConfig, classifier: Classifier) -> Self {
        Self {
            config,
            classifier,
            normalizer: RowNormalizer::new(config.fixed_income_grouping)
        }
    }

    /// Runs parser, classifier and normalizer over raw export bytes.
    ///
    /// # Errors
    /// Returns `PipelineError::Parse` when the export cannot be decoded or has no
    /// holdings table. Bad rows and unmapped assets are not errors, they end up in
    /// `PipelineOutput::diagnostics`.
    pub fn run(&self, input: &[u8]) -> Result<PipelineOutput, PipelineError> {
        let content = decode(input)?;
        let parser = self.config.mode.parser(self.config.delimiter);
        let report = parser.parse(content)?;

        info!(
            "Parsed {} holding(s) from {:?} input, {} row(s) skipped",
            report.holdings.len(),
            parser.mode(),
            report.diagnostics.len()
        );

        let mut diagnostics = report.diagnostics;
        let mut unmapped = HashSet::new();

        let classifications: Vec<Classification> = report
            .holdings
            .iter()
            .map(|holding| self.classifier.classify_holding(holding))
            .collect();

        for (holding, classification) in report.holdings.iter().zip(&classifications) {
            debug!("[{}] -> [{}] / [{}]", holding.label, classification.asset_name, classification.asset_class);

            if classification.source == ClassSource::Unclassified && unmapped.insert(classification.asset_name.as_str()) {
                diagnostics.push(Diagnostic::UnmappedAsset {
                    label: holding.label.clone(),
                    asset_name: classification.asset_name.clone()
                });
            }
        }

        if self.config.fixed_income_grouping {
            info!("Grouping CDs and Treasuries as Fixed");
        }

        let rows = self.normalizer.normalize_all(report.holdings.iter().zip(&classifications));

        emit_diagnostics(&diagnostics, self.config.quiet);

        Ok(PipelineOutput { rows, diagnostics })
    }
}

/// Logs diagnostics as warnings unless quiet.
pub fn emit_diagnostics(diagnostics: &[Diagnostic], quiet: bool) {
    if quiet {
        return;
    }

    for diagnostic in diagnostics {
        warn!("{diagnostic}");
    }
}
