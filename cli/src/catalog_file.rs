//! Option catalog declaration files.
//!
//! A declaration lists option entries and an optional scan order:
//!
//! ```yaml
//! scan_order: in-order
//! options:
//!   - short: o
//!     long: output
//!     argument: required
//!     placeholder: file
//!     description: Write the result to FILE
//!   - id: 1001
//!     long: dry-run
//!     description: Do nothing
//! ```
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, everything else as JSON.
//! The format is a superset of a serialized [`OptionCatalog`]: it adds the
//! `short` shorthand for `id`, so catalogs written by the library load here
//! unchanged.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use optscan_core::{ArgumentPolicy, CatalogError, DEFAULT_PLACEHOLDER, OptionCatalog, OptionSpec, ScanOrder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("option entry {0} needs a `short` character or a numeric `id`")]
    MissingId(usize),

    #[error("option entry {entry}: id {id} does not match short option '-{short}'")]
    IdMismatch { entry: usize, id: u32, short: char },

    #[error("option entry {entry}: short option {short:?} is not a printable ASCII character")]
    InvalidShort { entry: usize, short: char },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, CatalogFileError>;

/// One option as written in a declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub argument: ArgumentPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl OptionEntry {
    /// Resolves the entry into a spec. `position` is the entry's index, used
    /// in error messages.
    fn into_spec(self, position: usize) -> Result<OptionSpec> {
        let id = match (self.short, self.id) {
            (Some(short), _) if !short.is_ascii_graphic() => {
                return Err(CatalogFileError::InvalidShort {
                    entry: position,
                    short,
                });
            }
            (Some(short), Some(id)) if id != u32::from(short) => {
                return Err(CatalogFileError::IdMismatch {
                    entry: position,
                    id,
                    short,
                });
            }
            (Some(short), _) => u32::from(short),
            (None, Some(id)) => id,
            (None, None) => return Err(CatalogFileError::MissingId(position)),
        };

        Ok(OptionSpec::new(id, self.long.as_deref(), self.argument)
            .with_description(&self.description)
            .with_placeholder(self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)))
    }
}

/// A whole declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub scan_order: ScanOrder,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

impl CatalogFile {
    /// Reads a declaration, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let file = if is_yaml(path) {
            serde_yaml::from_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };
        Ok(file)
    }

    /// Validates the declaration and builds the catalog.
    pub fn into_catalog(self) -> Result<OptionCatalog> {
        let specs = self
            .options
            .into_iter()
            .enumerate()
            .map(|(position, entry)| entry.into_spec(position))
            .collect::<Result<Vec<_>>>()?;
        Ok(OptionCatalog::with_scan_order(specs, self.scan_order)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Loads and validates the catalog declared at `path`.
pub fn load_catalog(path: &Path) -> Result<OptionCatalog> {
    let catalog = CatalogFile::load(path)?.into_catalog()?;
    debug!(path = %path.display(), options = catalog.len(), "loaded option catalog");
    Ok(catalog)
}
