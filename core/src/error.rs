//! Error types for catalog construction and argument scanning.
//!
//! [`CatalogError`] describes a malformed option declaration and is raised
//! once, while the catalog is built. [`ParseError`] describes a problem with
//! a concrete argument vector and carries the index of the offending token.

use thiserror::Error;

/// Catalog validation errors.
///
/// These are programmer errors in the option declarations, never runtime
/// conditions of a particular command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two options share the same identifier.
    #[error("duplicate option identifier: {0}")]
    DuplicateId(u32),
    /// Two options share the same long name.
    #[error("duplicate long option: --{0}")]
    DuplicateLongName(String),
    /// The identifier is not a printable short option and no long name is set.
    #[error("option {0} has neither a short nor a long form")]
    MissingName(u32),
    /// The short character collides with the option prefix.
    #[error("reserved short option character: '{0}'")]
    ReservedShortName(char),
    /// The long name contains `=`, which separates an inline argument.
    #[error("invalid long option name: --{0}")]
    InvalidLongName(String),
}

/// Errors raised while scanning an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A short character or long name that the catalog does not declare.
    ///
    /// `name` is the offending option (`-z`, `--nope`), `token` the full
    /// argument it was found in (`-vz`, `--nope=1`).
    #[error("unknown option: {name}")]
    UnknownOption {
        name: String,
        token: String,
        index: usize,
    },
    /// A required argument was neither attached nor available as the next token.
    #[error("missing required argument for option: {option}")]
    MissingArgument { option: String, index: usize },
    /// `--name=value` was given for an option that takes no argument.
    #[error("option does not take an argument: {option}")]
    UnexpectedArgument { option: String, index: usize },
    /// [`ParsedOption::require_argument`](crate::ParsedOption::require_argument)
    /// was called on an occurrence without an argument.
    #[error("no argument present for option {id}")]
    ArgumentNotPresent { id: u32 },
}

impl ParseError {
    /// Index of the argument that triggered the error, if it came from a scan.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::UnknownOption { index, .. }
            | Self::MissingArgument { index, .. }
            | Self::UnexpectedArgument { index, .. } => Some(*index),
            Self::ArgumentNotPresent { .. } => None,
        }
    }
}
