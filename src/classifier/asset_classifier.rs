use tracing::trace;

use crate::classifier::heuristics::{HeuristicRule, DEFAULT_HEURISTICS};
use crate::classifier::mapping::MappingTable;
use crate::models::RawHolding;

/// Class given to assets that neither the class map nor any heuristic could place.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Where the class of an asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSource {
    ClassMap,
    Heuristic,
    Unclassified
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub asset_name: String,
    pub asset_class: String,
    pub source: ClassSource
}

/// Resolves the identity and the class of an asset in two independent stages.
///
/// The asset map renames labels to canonical asset names. The class map assigns classes
/// to canonical names, so one entry covers every label renamed to that name. Assets
/// missing from the class map fall back to the heuristic rules, then to `UNCLASSIFIED`.
pub struct Classifier {
    asset_map: MappingTable,
    class_map: MappingTable,
    heuristics: &'static [HeuristicRule]
}

impl Classifier {
    pub fn new(asset_map: MappingTable, class_map: MappingTable) -> Self {
        Self {
            asset_map,
            class_map,
            heuristics: DEFAULT_HEURISTICS
        }
    }

    /// Replaces the built-in heuristic rules.
    pub fn with_heuristics(mut self, heuristics: &'static [HeuristicRule]) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Classifies a bare label.
    pub fn classify(&self, label: &str) -> Classification {
        self.resolve(label, &[label])
    }

    /// Classifies a parsed holding. Heuristics also look at its description when the
    /// label alone is not conclusive.
    pub fn classify_holding(&self, holding: &RawHolding) -> Classification {
        let texts: Vec<&str> = holding.heuristic_texts().collect();
        self.resolve(&holding.label, &texts)
    }

    fn resolve(&self, label: &str, texts: &[&str]) -> Classification {
        let label = label.trim();
        let asset_name = self.asset_map.get(label).unwrap_or(label).to_string();

        if let Some(asset_class) = self.class_map.get(&asset_name).filter(|class| !class.is_empty()) {
            trace!("Class of [{asset_name}] is mapped to [{asset_class}]");

            return Classification {
                asset_name,
                asset_class: asset_class.to_string(),
                source: ClassSource::ClassMap
            };
        }

        let rule = self
            .heuristics
            .iter()
            .find(|rule| !rule.class.is_empty() && texts.iter().any(|text| rule.matches(text)));

        match rule {
            Some(rule) => {
                trace!("Class of [{asset_name}] guessed as [{}]", rule.class);

                Classification {
                    asset_name,
                    asset_class: rule.class.to_string(),
                    source: ClassSource::Heuristic
                }
            }
            None => Classification {
                asset_name,
                asset_class: UNCLASSIFIED.to_string(),
                source: ClassSource::Unclassified
            }
        }
    }
}
