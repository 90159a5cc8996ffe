mod asset_classifier;
mod errors;
mod heuristics;
mod mapping;

pub use asset_classifier::{ClassSource, Classification, Classifier, UNCLASSIFIED};
pub use errors::MappingError;
pub use heuristics::{HeuristicRule, Matcher, DEFAULT_HEURISTICS};
pub use mapping::{normalize_label, MappingEntry, MappingTable};
