//! Option catalogs, getopt-style argument scanning and help text layout.
//!
//! This crate turns a declared set of options and a raw argument vector into
//! a structured result:
//!
//! - [`OptionSpec`]: one option: identifier (doubling as the short option
//!   character when printable), optional long name, argument policy,
//!   description and help placeholder.
//! - [`OptionCatalog`]: an immutable, validated table of specs. Construction
//!   rejects duplicate identifiers and long names, and renders the help text.
//! - [`OptionCatalog::parse`] / [`OptionCatalog::parse_until`]: scan an
//!   argument slice into a [`ResultSet`] of [`ParsedOption`]s and positionals,
//!   optionally stopping early under a [`StopCondition`] and returning the
//!   unscanned [`Remainder`].
//! - [`help`]: the fixed-width help formatter.
//!
//! Scanning follows GNU conventions: short options cluster (`-vh`), attach
//! their argument (`-ofile`) or take it from the next token (`-o file`),
//! long options take `--name=value` or `--name value`, and `--` ends option
//! processing. A long option with an optional argument only binds it through
//! `=value`; a short one also binds a following token that does not start
//! with `-`.
//!
//! Every parse builds its own scanner state, so a catalog can be shared
//! freely between threads and reused for any number of parses. Results
//! borrow from the argument slice and cannot outlive it.
//!
//! # Example
//!
//! ```
//! use optscan_core::*;
//!
//! let global = OptionCatalog::new(vec![
//!     OptionSpec::flag('v', Some("verbose")).with_description("Print more"),
//!     OptionSpec::required('o', Some("output"))
//!         .with_description("Write to FILE")
//!         .with_placeholder("file"),
//! ])
//! .unwrap();
//! let sub = OptionCatalog::new(vec![OptionSpec::flag('a', Some("all"))]).unwrap();
//!
//! let args = ["-v", "-oout.txt", "list", "--all"];
//! let (opts, rest) = global
//!     .parse_until(&args, StopCondition::BeforeFirstPositional)
//!     .unwrap();
//! assert!(opts.has_option('v'));
//! assert_eq!(opts.value_of('o'), Some("out.txt"));
//! assert_eq!(rest.first(), Some("list"));
//!
//! let sub_opts = sub.parse(rest.advance(1).args()).unwrap();
//! assert!(sub_opts.has_option('a'));
//!
//! assert!(global.help_text().contains("-o, --output <file>"));
//! ```

mod catalog;
mod error;
pub mod help;
mod scanner;
mod stop;
mod types;

pub use catalog::{OptionCatalog, ScanOrder};
pub use error::{CatalogError, ParseError};
pub use help::render_help;
pub use scanner::TERMINATOR;
pub use stop::{Remainder, StopCondition};
pub use types::*;
