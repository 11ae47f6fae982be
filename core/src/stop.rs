//! Stop policies and the unparsed remainder.
//!
//! [`OptionCatalog::parse_until`] drives the scanner one token at a time and
//! stops according to a [`StopCondition`]. The remainder boundary is always
//! the index the triggering step started at, read before the step runs, so
//! clustered short options and consumed option arguments never shift it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::OptionCatalog;
use crate::error::ParseError;
use crate::scanner::{Scanner, Step};
use crate::types::ResultSet;

/// When [`OptionCatalog::parse_until`] stops scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StopCondition {
    /// Scan everything; positionals (including those after `--`) are collected.
    #[default]
    AllOptions,
    /// Stop at the first positional or `--`, leaving it in the remainder.
    BeforeFirstPositional,
    /// Stop right after collecting the first positional.
    AfterFirstPositional,
    /// Stop at the first unknown option or argument error without failing.
    BeforeFirstError,
}

/// The unscanned tail of an argument vector.
///
/// Borrows the original slice; nothing is copied.
///
/// # Examples
///
/// ```
/// use optscan_core::{OptionCatalog, OptionSpec, StopCondition};
///
/// let catalog = OptionCatalog::new(vec![OptionSpec::flag('v', Some("verbose"))]).unwrap();
/// let args = ["-v", "cmd", "-a"];
/// let (results, rest) = catalog
///     .parse_until(&args, StopCondition::BeforeFirstPositional)
///     .unwrap();
///
/// assert!(results.has_option('v'));
/// assert_eq!(rest.start(), 1);
/// assert_eq!(rest.len(), 2);
/// assert_eq!(rest.first(), Some("cmd"));
/// ```
#[derive(Debug)]
pub struct Remainder<'a, S> {
    args: &'a [S],
    start: usize,
}

impl<S> Clone for Remainder<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Remainder<'_, S> {}

impl<'a, S: AsRef<str>> Remainder<'a, S> {
    pub(crate) fn new(args: &'a [S], start: usize) -> Self {
        Self {
            args,
            start: start.min(args.len()),
        }
    }

    /// Index of the first unscanned argument within the original slice.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The unscanned arguments.
    pub fn args(&self) -> &'a [S] {
        &self.args[self.start..]
    }

    /// The full slice the remainder was taken from.
    pub fn original(&self) -> &'a [S] {
        self.args
    }

    pub fn len(&self) -> usize {
        self.args.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&'a str> {
        self.args().first().map(|arg| arg.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> {
        self.args().iter().map(|arg| arg.as_ref())
    }

    /// Skips `count` more arguments, e.g. a subcommand name.
    pub fn advance(self, count: usize) -> Self {
        Self::new(self.args, self.start.saturating_add(count))
    }
}

impl OptionCatalog {
    /// Parses every argument, collecting options and positionals.
    ///
    /// `args` must not include the program name.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use optscan_core::{OptionCatalog, OptionSpec};
    ///
    /// let catalog = OptionCatalog::new(vec![
    ///     OptionSpec::flag('h', Some("help")),
    ///     OptionSpec::required('o', Some("output")),
    /// ])
    /// .unwrap();
    ///
    /// let results = catalog.parse(&["-h", "--output", "out.txt"]).unwrap();
    /// assert!(results.has_option('h'));
    /// assert_eq!(results.value_of('o'), Some("out.txt"));
    ///
    /// let err = catalog.parse(&["--nope"]).unwrap_err();
    /// assert_eq!(err.to_string(), "unknown option: --nope");
    /// ```
    pub fn parse<'a, S: AsRef<str>>(&self, args: &'a [S]) -> Result<ResultSet<'a>, ParseError> {
        self.parse_until(args, StopCondition::AllOptions)
            .map(|(results, _)| results)
    }

    /// Parses until `stop` triggers, returning the results and the remainder.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] unless `stop` is
    /// [`StopCondition::BeforeFirstError`], which never fails.
    ///
    /// # Terminator
    ///
    /// Under [`StopCondition::AfterFirstPositional`] a `--` consumed before
    /// the positional is not carried into the remainder, so a later pass
    /// over [`Remainder::args`] scans `-x` tokens as options again. Use
    /// [`StopCondition::BeforeFirstPositional`] to keep the `--` in the tail.
    pub fn parse_until<'a, S: AsRef<str>>(
        &self,
        args: &'a [S],
        stop: StopCondition,
    ) -> Result<(ResultSet<'a>, Remainder<'a, S>), ParseError> {
        let mut scanner = Scanner::new(self, args);
        let mut results = ResultSet::new();

        while !scanner.is_finished() {
            let entry = scanner.index();
            match scanner.step(&mut results) {
                Ok(Step::Options) => {}
                Ok(Step::Terminator) => {
                    if stop == StopCondition::BeforeFirstPositional {
                        debug!(index = entry, "stopped at option terminator");
                        return Ok((results, Remainder::new(args, entry)));
                    }
                }
                Ok(Step::Positional(value)) => match stop {
                    StopCondition::BeforeFirstPositional => {
                        debug!(index = entry, "stopped before positional");
                        return Ok((results, Remainder::new(args, entry)));
                    }
                    StopCondition::AfterFirstPositional => {
                        results.push_positional(value);
                        debug!(index = entry, "stopped after positional");
                        return Ok((results, Remainder::new(args, scanner.index())));
                    }
                    StopCondition::AllOptions | StopCondition::BeforeFirstError => {
                        results.push_positional(value);
                    }
                },
                Err(err) if stop == StopCondition::BeforeFirstError => {
                    debug!(index = entry, error = %err, "stopped before error");
                    return Ok((results, Remainder::new(args, entry)));
                }
                Err(err) => return Err(err),
            }
        }

        Ok((results, Remainder::new(args, args.len())))
    }
}
