//! Token-by-token matching of an argument vector against a catalog.
//!
//! The scanner owns all per-call state: the index of the next token and
//! whether option scanning has ended (after `--`, or after the first
//! positional in [`ScanOrder::PosixStrict`] catalogs). It is created for a
//! single parse and dropped with it; nothing survives between calls.
//!
//! Each [`Scanner::step`] consumes exactly one token plus, when an option
//! binds a detached argument, the token after it. Short clusters (`-abc`)
//! are resolved entirely within one step, so callers that need a stable
//! position can read [`Scanner::index`] before stepping.

use tracing::trace;

use crate::catalog::{OptionCatalog, ScanOrder};
use crate::error::ParseError;
use crate::types::{ArgumentPolicy, OptionSpec, ParsedOption, ResultSet};

/// Marker that ends option scanning.
pub const TERMINATOR: &str = "--";

/// What a single scan step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    /// One or more options were appended to the result set.
    Options,
    /// A positional token; the caller decides whether to keep it.
    Positional(&'a str),
    /// The `--` marker was consumed.
    Terminator,
}

pub(crate) struct Scanner<'c, 'a, S> {
    catalog: &'c OptionCatalog,
    args: &'a [S],
    index: usize,
    options_done: bool,
}

impl<'c, 'a, S: AsRef<str>> Scanner<'c, 'a, S> {
    pub(crate) fn new(catalog: &'c OptionCatalog, args: &'a [S]) -> Self {
        Self {
            catalog,
            args,
            index: 0,
            options_done: false,
        }
    }

    /// Index of the next token to be scanned.
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.index >= self.args.len()
    }

    /// Scans the token at [`index`](Self::index).
    ///
    /// Matched options are pushed onto `results` as they are resolved, so a
    /// cluster such as `-vz` leaves `-v` recorded even though `z` fails.
    pub(crate) fn step(&mut self, results: &mut ResultSet<'a>) -> Result<Step<'a>, ParseError> {
        let args = self.args;
        let entry = self.index;
        let token = args[entry].as_ref();
        self.index += 1;
        trace!(index = entry, token, "scanning argument");

        if self.options_done {
            return Ok(Step::Positional(token));
        }

        if token == TERMINATOR {
            self.options_done = true;
            return Ok(Step::Terminator);
        }

        if let Some(body) = token.strip_prefix(TERMINATOR) {
            return self.scan_long(entry, token, body, results);
        }

        if let Some(cluster) = token.strip_prefix('-') {
            if !cluster.is_empty() {
                return self.scan_short(entry, token, cluster, results);
            }
        }

        if self.catalog.scan_order() == ScanOrder::PosixStrict {
            self.options_done = true;
        }
        Ok(Step::Positional(token))
    }

    fn scan_long(
        &mut self,
        entry: usize,
        token: &'a str,
        body: &'a str,
        results: &mut ResultSet<'a>,
    ) -> Result<Step<'a>, ParseError> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let catalog = self.catalog;
        let spec = catalog
            .by_long(name)
            .ok_or_else(|| ParseError::UnknownOption {
                name: format!("--{name}"),
                token: token.to_string(),
                index: entry,
            })?;

        let argument = match (spec.policy, inline) {
            (ArgumentPolicy::None, Some(_)) => {
                return Err(ParseError::UnexpectedArgument {
                    option: format!("--{name}"),
                    index: entry,
                });
            }
            (ArgumentPolicy::None, None) => None,
            (_, Some(value)) => Some(value),
            (ArgumentPolicy::Required, None) => Some(self.required_argument(spec, entry)?),
            // Long options only take an optional argument through `=value`.
            (ArgumentPolicy::Optional, None) => None,
        };

        results.push_option(ParsedOption::new(spec.id, argument));
        Ok(Step::Options)
    }

    fn scan_short(
        &mut self,
        entry: usize,
        token: &'a str,
        cluster: &'a str,
        results: &mut ResultSet<'a>,
    ) -> Result<Step<'a>, ParseError> {
        let catalog = self.catalog;
        for (offset, c) in cluster.char_indices() {
            let spec = catalog
                .by_short(c)
                .ok_or_else(|| ParseError::UnknownOption {
                    name: format!("-{c}"),
                    token: token.to_string(),
                    index: entry,
                })?;

            if spec.policy == ArgumentPolicy::None {
                results.push_option(ParsedOption::new(spec.id, None));
                continue;
            }

            let attached = &cluster[offset + c.len_utf8()..];
            let argument = if !attached.is_empty() {
                Some(attached)
            } else if spec.policy == ArgumentPolicy::Required {
                Some(self.required_argument(spec, entry)?)
            } else {
                self.optional_argument()
            };

            results.push_option(ParsedOption::new(spec.id, argument));
            return Ok(Step::Options);
        }

        Ok(Step::Options)
    }

    /// Consumes the next token unconditionally, whatever it looks like.
    fn required_argument(&mut self, spec: &OptionSpec, entry: usize) -> Result<&'a str, ParseError> {
        let args = self.args;
        match args.get(self.index) {
            Some(value) => {
                self.index += 1;
                Ok(value.as_ref())
            }
            None => Err(ParseError::MissingArgument {
                option: spec.display_name(),
                index: entry,
            }),
        }
    }

    /// Consumes the next token only if it does not look like an option.
    fn optional_argument(&mut self) -> Option<&'a str> {
        let args = self.args;
        let value = args.get(self.index)?.as_ref();
        if value.starts_with('-') {
            return None;
        }
        self.index += 1;
        Some(value)
    }
}
