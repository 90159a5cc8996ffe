use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::classifier::errors::MappingError;
use crate::models::Diagnostic;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Lookup form of a label or asset name: trimmed, whitespace collapsed, lowercased.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Key as written in the file.
    pub key: String,
    pub value: String,
    /// Line of the file the entry came from.
    pub line: u64
}

/// An override table loaded from a `key,value` mapping file.
///
/// Entries keep the order of the file. Keys are matched exactly on their normalized
/// form and the first entry for a key wins.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    file: String,
    entries: Vec<MappingEntry>,
    index: HashMap<String, usize>
}

impl MappingTable {
    /// Creates an empty table attributed to `file`.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            entries: Vec::new(),
            index: HashMap::new()
        }
    }

    /// Parses mapping file content.
    ///
    /// Blank lines and `#` comments are ignored. Lines without a delimiter, or with an
    /// empty key or value, and repeated keys are reported as diagnostics and skipped.
    /// Fields past the second are ignored and a quoted field cannot span lines.
    ///
    /// # Errors
    /// Returns `MappingError` when the content is not UTF-8 or cannot be read as
    /// delimited text at all.
    pub fn parse(file: &str, bytes: &[u8], delimiter: u8) -> Result<(Self, Vec<Diagnostic>), MappingError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let content = std::str::from_utf8(bytes).map_err(|error| MappingError::Encoding {
            file: file.to_string(),
            valid_up_to: error.valid_up_to()
        })?;

        let mut table = Self::new(file);
        let mut diagnostics = Vec::new();

        //NOTE: Each line is split on its own so that reported line numbers match the file
        for (number, text) in content.lines().enumerate() {
            let line = number as u64 + 1;
            let text = text.trim();

            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let record = split_line(text, delimiter).map_err(|error| MappingError::Read {
                file: file.to_string(),
                error
            })?;

            let Some(record) = record else {
                continue;
            };

            let key = record.get(0).unwrap_or_default();

            if record.iter().all(str::is_empty) {
                continue;
            }

            let reason = match record.get(1) {
                None => Some("missing delimiter"),
                Some(_) if key.is_empty() => Some("empty key"),
                Some("") => Some("empty value"),
                Some(_) => None
            };

            if let Some(reason) = reason {
                diagnostics.push(Diagnostic::MalformedMapping {
                    file: file.to_string(),
                    line,
                    reason: reason.to_string()
                });
                continue;
            }

            let value = record.get(1).unwrap_or_default();

            if !table.insert(key, value, line) {
                diagnostics.push(Diagnostic::DuplicateMapping {
                    file: file.to_string(),
                    line,
                    key: key.to_string()
                });
            }
        }

        debug!("Loaded {} mapping(s) from [{file}]", table.len());

        Ok((table, diagnostics))
    }

    /// Adds an entry unless its key is already present. Returns whether it was added.
    pub fn insert(&mut self, key: &str, value: &str, line: u64) -> bool {
        let normalized = normalize_label(key);

        if self.index.contains_key(&normalized) {
            return false;
        }

        self.index.insert(normalized, self.entries.len());
        self.entries.push(MappingEntry {
            key: key.to_string(),
            value: value.to_string(),
            line
        });

        true
    }

    /// Looks up the value mapped to `key`, comparing normalized forms.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(&normalize_label(key))
            .map(|position| self.entries[*position].value.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_line(text: &str, delimiter: u8) -> Result<Option<StringRecord>, csv::Error> {
    ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes())
        .records()
        .next()
        .transpose()
}
