use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::classifier::UNCLASSIFIED;
use crate::engine::PipelineError;
use crate::models::NormalizedRow;

const ROW_HEADER: [&str; 5] = ["account", "asset_name", "asset_class", "quantity", "market_value"];

/// Renders report rows as CSV, header first even when there are no rows.
pub fn write_rows<W: Write>(writer: W, rows: &[NormalizedRow]) -> Result<(), PipelineError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(ROW_HEADER)?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}

/// Writes unmapped assets as class map lines for the user to complete.
pub fn write_candidates<W: Write>(mut writer: W, asset_names: &[&str]) -> Result<(), PipelineError> {
    writeln!(writer, "# Class map candidates: replace {UNCLASSIFIED} with the class of each asset")?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    for asset_name in asset_names {
        writer.write_record([*asset_name, UNCLASSIFIED])?;
    }

    writer.flush()?;

    Ok(())
}

/// Renders `date` with a strftime `format` for use in file names.
///
/// # Errors
/// Returns `PipelineError::DateFormat` when the format has an unknown specifier or asks
/// for a field a date does not have, such as an hour.
pub fn date_suffix(date: NaiveDate, format: &str) -> Result<String, PipelineError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();

    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(PipelineError::DateFormat(format.to_string()));
    }

    let mut suffix = String::new();

    write!(suffix, "{}", date.format_with_items(items.iter()))
        .map_err(|_| PipelineError::DateFormat(format.to_string()))?;

    Ok(suffix)
}

/// Appends `-suffix` to the file name of `path`, ahead of its extension.
pub fn dated_path(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    let mut name = format!("{stem}-{suffix}");

    if let Some(extension) = path.extension() {
        name.push('.');
        name.push_str(&extension.to_string_lossy());
    }

    path.with_file_name(name)
}
