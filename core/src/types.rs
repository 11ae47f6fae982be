//! Option declarations and parse results.
//!
//! [`OptionSpec`] declares one option of a catalog. [`ParsedOption`] and
//! [`ResultSet`] are what a scan produces; both borrow their text from the
//! argument slice passed to the parser, so they cannot outlive it.

use std::ops::{AddAssign, Index};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Placeholder shown in help text when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "arg";

/// Whether an option takes an argument.
///
/// # Examples
///
/// ```
/// use optscan_core::ArgumentPolicy;
///
/// assert_eq!(ArgumentPolicy::default(), ArgumentPolicy::None);
/// assert!(ArgumentPolicy::Optional.accepts_argument());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentPolicy {
    /// Plain flag (the default).
    #[default]
    None,
    /// An argument must follow, attached or as the next token.
    Required,
    /// An argument may be attached; see the scanner for detached binding.
    Optional,
}

impl ArgumentPolicy {
    /// Returns `true` for [`Required`](Self::Required) and [`Optional`](Self::Optional).
    pub fn accepts_argument(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Returns the short option character encoded by `id`, if it is printable.
///
/// Identifiers in the printable ASCII range (33..=126) double as the short
/// option character; anything else is an opaque identifier for a long-only
/// option.
pub fn short_char(id: u32) -> Option<char> {
    char::from_u32(id).filter(char::is_ascii_graphic)
}

/// Declaration of one command-line option.
///
/// Use [`flag`](OptionSpec::flag), [`required`](OptionSpec::required) or
/// [`optional`](OptionSpec::optional) and chain
/// [`with_description`](OptionSpec::with_description) /
/// [`with_placeholder`](OptionSpec::with_placeholder).
///
/// # Examples
///
/// ```
/// use optscan_core::{ArgumentPolicy, OptionSpec};
///
/// let output = OptionSpec::required('o', Some("output"))
///     .with_description("Write to FILE")
///     .with_placeholder("file");
/// assert_eq!(output.short(), Some('o'));
/// assert_eq!(output.display_name(), "-o");
/// assert_eq!(output.policy, ArgumentPolicy::Required);
///
/// let long_only = OptionSpec::flag(1001u32, Some("long-only"));
/// assert_eq!(long_only.short(), None);
/// assert_eq!(long_only.display_name(), "--long-only");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Identifier reported in [`ParsedOption::id`]; the short character for
    /// printable values.
    pub id: u32,
    /// Long name without the leading `--`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Description rendered in help text.
    #[serde(default)]
    pub description: String,
    /// Whether the option takes an argument, serialized as `argument`.
    #[serde(default, rename = "argument")]
    pub policy: ArgumentPolicy,
    /// Argument name rendered in help text.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl OptionSpec {
    /// Creates an option with the given argument policy.
    ///
    /// An empty long name is treated as absent.
    pub fn new(id: impl Into<u32>, long: Option<&str>, policy: ArgumentPolicy) -> Self {
        Self {
            id: id.into(),
            long: long.filter(|name| !name.is_empty()).map(String::from),
            description: String::new(),
            policy,
            placeholder: default_placeholder(),
        }
    }

    /// Creates an option that takes no argument.
    pub fn flag(id: impl Into<u32>, long: Option<&str>) -> Self {
        Self::new(id, long, ArgumentPolicy::None)
    }

    /// Creates an option that requires an argument.
    pub fn required(id: impl Into<u32>, long: Option<&str>) -> Self {
        Self::new(id, long, ArgumentPolicy::Required)
    }

    /// Creates an option that accepts an optional argument.
    pub fn optional(id: impl Into<u32>, long: Option<&str>) -> Self {
        Self::new(id, long, ArgumentPolicy::Optional)
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the argument placeholder used in help text.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Short option character, derived from the identifier.
    pub fn short(&self) -> Option<char> {
        short_char(self.id)
    }

    /// Long name, with empty names normalized to `None`.
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref().filter(|name| !name.is_empty())
    }

    /// Canonical display form: `-x` when a short form exists, else `--long`.
    pub fn display_name(&self) -> String {
        match (self.short(), self.long_name()) {
            (Some(c), _) => format!("-{c}"),
            (None, Some(long)) => format!("--{long}"),
            (None, None) => format!("#{}", self.id),
        }
    }
}

/// One option occurrence found on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedOption<'a> {
    id: u32,
    argument: Option<&'a str>,
}

impl<'a> ParsedOption<'a> {
    pub(crate) fn new(id: u32, argument: Option<&'a str>) -> Self {
        Self { id, argument }
    }

    /// Identifier of the matching [`OptionSpec`].
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Short option character, when the identifier is printable.
    pub fn short(&self) -> Option<char> {
        short_char(self.id)
    }

    pub fn has_argument(&self) -> bool {
        self.argument.is_some()
    }

    /// The bound argument, borrowed from the original argument vector.
    pub fn argument(&self) -> Option<&'a str> {
        self.argument
    }

    /// The bound argument, or an error when the occurrence has none.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ArgumentNotPresent`] for options given without
    /// an argument (only possible for optional-argument options).
    pub fn require_argument(&self) -> Result<&'a str, ParseError> {
        self.argument
            .ok_or(ParseError::ArgumentNotPresent { id: self.id })
    }
}

/// Options and positional arguments in command-line order.
///
/// # Examples
///
/// ```
/// use optscan_core::{OptionCatalog, OptionSpec};
///
/// let catalog = OptionCatalog::new(vec![
///     OptionSpec::flag('v', Some("verbose")),
///     OptionSpec::required('o', Some("output")),
/// ])
/// .unwrap();
///
/// let args = ["file1", "-v", "--output=out.txt", "file2"];
/// let results = catalog.parse(&args).unwrap();
/// assert!(results.has_option('v'));
/// assert_eq!(results.value_of('o'), Some("out.txt"));
/// assert_eq!(results.positionals(), ["file1", "file2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet<'a> {
    options: Vec<ParsedOption<'a>>,
    positionals: Vec<&'a str>,
}

impl<'a> ResultSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_option(&mut self, option: ParsedOption<'a>) {
        self.options.push(option);
    }

    pub(crate) fn push_positional(&mut self, value: &'a str) {
        self.positionals.push(value);
    }

    /// Parsed options in order of appearance.
    pub fn options(&self) -> &[ParsedOption<'a>] {
        &self.options
    }

    /// Positional arguments in order of appearance.
    pub fn positionals(&self) -> &[&'a str] {
        &self.positionals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParsedOption<'a>> {
        self.options.iter()
    }

    /// Number of parsed options (positionals are not counted).
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParsedOption<'a>> {
        self.options.get(index)
    }

    /// Returns `true` if the option with `id` occurred at least once.
    pub fn has_option(&self, id: impl Into<u32>) -> bool {
        let id = id.into();
        self.options.iter().any(|opt| opt.id == id)
    }

    /// All occurrences of the option with `id`.
    pub fn occurrences(&self, id: impl Into<u32>) -> impl Iterator<Item = &ParsedOption<'a>> {
        let id = id.into();
        self.options.iter().filter(move |opt| opt.id == id)
    }

    /// How many times the option with `id` occurred.
    pub fn count(&self, id: impl Into<u32>) -> usize {
        self.occurrences(id).count()
    }

    /// Argument of the last occurrence of `id` that carried one.
    pub fn value_of(&self, id: impl Into<u32>) -> Option<&'a str> {
        let id = id.into();
        self.options
            .iter()
            .rev()
            .filter(|opt| opt.id == id)
            .find_map(|opt| opt.argument)
    }

    /// Appends the options and positionals of `other`, preserving order.
    pub fn append(&mut self, other: ResultSet<'a>) {
        self.options.extend(other.options);
        self.positionals.extend(other.positionals);
    }
}

impl<'a> AddAssign for ResultSet<'a> {
    fn add_assign(&mut self, other: ResultSet<'a>) {
        self.append(other);
    }
}

impl<'a> Index<usize> for ResultSet<'a> {
    type Output = ParsedOption<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.options[index]
    }
}

impl<'r, 'a> IntoIterator for &'r ResultSet<'a> {
    type Item = &'r ParsedOption<'a>;
    type IntoIter = std::slice::Iter<'r, ParsedOption<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
