//! Validated option catalogs.
//!
//! An [`OptionCatalog`] is built once from an ordered list of
//! [`OptionSpec`]s and never changes afterwards. Construction rejects
//! declarations that would make scanning ambiguous, and renders the help
//! text so it can be handed out without further work.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::CatalogError;
use crate::help::render_help;
use crate::types::OptionSpec;

/// How positional arguments interact with option scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScanOrder {
    /// Options and positionals may be freely interleaved (the default).
    #[default]
    InOrder,
    /// The first positional ends option scanning, as if `--` preceded it.
    PosixStrict,
}

/// Serialized shape of a catalog.
#[derive(Deserialize)]
struct CatalogDecl {
    options: Vec<OptionSpec>,
    #[serde(default)]
    scan_order: ScanOrder,
}

#[derive(Serialize)]
struct CatalogDeclRef<'c> {
    options: &'c [OptionSpec],
    scan_order: ScanOrder,
}

/// An immutable, validated table of option declarations.
///
/// # Examples
///
/// ```
/// use optscan_core::{CatalogError, OptionCatalog, OptionSpec};
///
/// let catalog = OptionCatalog::new(vec![
///     OptionSpec::flag('h', Some("help")).with_description("Show help"),
///     OptionSpec::required('o', Some("output")),
/// ])
/// .unwrap();
/// assert_eq!(catalog.by_long("output").unwrap().id, 'o' as u32);
/// assert!(catalog.help_text().contains("--help"));
///
/// let err = OptionCatalog::new(vec![
///     OptionSpec::flag('h', Some("help")),
///     OptionSpec::flag(1001u32, Some("help")),
/// ])
/// .unwrap_err();
/// assert_eq!(err, CatalogError::DuplicateLongName("help".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct OptionCatalog {
    specs: Vec<OptionSpec>,
    scan_order: ScanOrder,
    help: String,
}

impl OptionCatalog {
    /// Validates `specs` and builds an in-order catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found: duplicate identifiers,
    /// duplicate long names, long names containing `=`, options with no
    /// usable name, or the reserved `-` short option.
    pub fn new(specs: Vec<OptionSpec>) -> Result<Self, CatalogError> {
        Self::with_scan_order(specs, ScanOrder::InOrder)
    }

    /// Validates `specs` and builds a catalog with the given scan order.
    ///
    /// # Errors
    ///
    /// See [`OptionCatalog::new`].
    pub fn with_scan_order(
        specs: Vec<OptionSpec>,
        scan_order: ScanOrder,
    ) -> Result<Self, CatalogError> {
        validate_specs(&specs)?;
        let help = render_help(&specs);
        debug!(
            options = specs.len(),
            ?scan_order,
            "built option catalog"
        );
        Ok(Self {
            specs,
            scan_order,
            help,
        })
    }

    /// Option declarations in declaration order.
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn scan_order(&self) -> ScanOrder {
        self.scan_order
    }

    /// Looks up an option by identifier.
    pub fn by_id(&self, id: impl Into<u32>) -> Option<&OptionSpec> {
        let id = id.into();
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Looks up an option by its short character.
    pub fn by_short(&self, short: char) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.short() == Some(short))
    }

    /// Looks up an option by exact long name (no prefix matching).
    pub fn by_long(&self, name: &str) -> Option<&OptionSpec> {
        if name.is_empty() {
            return None;
        }
        self.specs
            .iter()
            .find(|spec| spec.long_name() == Some(name))
    }

    /// Help text rendered when the catalog was built.
    pub fn help_text(&self) -> &str {
        &self.help
    }
}

impl TryFrom<Vec<OptionSpec>> for OptionCatalog {
    type Error = CatalogError;

    fn try_from(specs: Vec<OptionSpec>) -> Result<Self, Self::Error> {
        Self::new(specs)
    }
}

impl Serialize for OptionCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CatalogDeclRef {
            options: &self.specs,
            scan_order: self.scan_order,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OptionCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let decl = CatalogDecl::deserialize(deserializer)?;
        Self::with_scan_order(decl.options, decl.scan_order).map_err(serde::de::Error::custom)
    }
}

impl<'c> IntoIterator for &'c OptionCatalog {
    type Item = &'c OptionSpec;
    type IntoIter = std::slice::Iter<'c, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

fn validate_specs(specs: &[OptionSpec]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();
    let mut seen_longs: HashSet<&str> = HashSet::new();

    for spec in specs {
        if !seen_ids.insert(spec.id) {
            return Err(CatalogError::DuplicateId(spec.id));
        }

        let short = spec.short();
        if short == Some('-') {
            return Err(CatalogError::ReservedShortName('-'));
        }

        match spec.long_name() {
            Some(long) => {
                if long.contains('=') {
                    return Err(CatalogError::InvalidLongName(long.to_string()));
                }
                if !seen_longs.insert(long) {
                    return Err(CatalogError::DuplicateLongName(long.to_string()));
                }
            }
            None if short.is_none() => return Err(CatalogError::MissingName(spec.id)),
            None => {}
        }
    }

    Ok(())
}
