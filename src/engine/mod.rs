mod config;
mod errors;
mod loader;
mod pipeline;
mod report;
#[cfg(test)]
mod tests;

pub use config::{PipelineConfig, DEFAULT_ASSET_MAP, DEFAULT_CLASS_MAP, MAPPING_DELIMITER};
pub use errors::PipelineError;
pub use loader::load_mapping;
pub use pipeline::{emit_diagnostics, Pipeline, PipelineOutput};
pub use report::{date_suffix, dated_path, write_candidates, write_rows};
