use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::classifier::{MappingError, MappingTable};
use crate::models::Diagnostic;

/// Reads a mapping file from disk.
///
/// A missing file is fatal only when `required` is set (i.e. the user named it
/// explicitly). Otherwise the run carries on with an empty table.
pub fn load_mapping(path: &Path, required: bool, delimiter: u8) -> Result<(MappingTable, Vec<Diagnostic>), MappingError> {
    let file = path.display().to_string();

    match fs::read(path) {
        Ok(bytes) => {
            let (table, diagnostics) = MappingTable::parse(&file, &bytes, delimiter)?;

            if table.is_empty() {
                warn!("Mapping file [{file}] has no usable entries");
            } else {
                info!("Read {} mapping(s) from [{file}]", table.len());
            }

            Ok((table, diagnostics))
        }
        Err(error) if error.kind() == ErrorKind::NotFound && !required => {
            warn!("Mapping file [{file}] not found, no overrides will be taken from it");
            Ok((MappingTable::new(file), Vec::new()))
        }
        Err(error) => Err(MappingError::Io { file, error })
    }
}
