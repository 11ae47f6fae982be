//! Fixed-width help text for an option catalog.
//!
//! Every option becomes one block: a two-space indent, the option label
//! padded to a common column, and the description greedily word-wrapped at
//! [`HELP_WIDTH`] columns with continuation lines aligned under the first
//! description word.
//!
//! ```text
//!   -h, --help          Display this help message
//!   -o, --output <file> Write the result to a file instead of standard
//!                       output
//!       --long-only     This has no short form
//! ```

use crate::types::{ArgumentPolicy, OptionSpec};

/// Maximum line width of rendered help text.
pub const HELP_WIDTH: usize = 80;

/// Indentation before every option label.
pub const LABEL_INDENT: usize = 2;

/// Builds the label for one option, e.g. `-o, --output <file>`.
///
/// Options without a short form are padded with four spaces so their long
/// names line up with those of options that have both forms.
///
/// # Examples
///
/// ```
/// use optscan_core::{OptionSpec, help::option_label};
///
/// let spec = OptionSpec::required('o', Some("output")).with_placeholder("file");
/// assert_eq!(option_label(&spec), "-o, --output <file>");
///
/// assert_eq!(option_label(&OptionSpec::optional('p', None)), "-p[arg]");
/// assert_eq!(option_label(&OptionSpec::optional(1001u32, Some("level"))), "    --level[=arg]");
/// ```
pub fn option_label(spec: &OptionSpec) -> String {
    let mut label = String::new();
    let long = spec.long_name();

    match spec.short() {
        Some(c) => {
            label.push('-');
            label.push(c);
            if long.is_some() {
                label.push_str(", ");
            }
        }
        None => label.push_str("    "),
    }

    if let Some(long) = long {
        label.push_str("--");
        label.push_str(long);
    }

    match spec.policy {
        ArgumentPolicy::None => {}
        ArgumentPolicy::Required => {
            label.push_str(" <");
            label.push_str(&spec.placeholder);
            label.push('>');
        }
        ArgumentPolicy::Optional => {
            label.push_str(if long.is_some() { "[=" } else { "[" });
            label.push_str(&spec.placeholder);
            label.push(']');
        }
    }

    label
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Renders the help text for `specs` in declaration order.
///
/// The result only depends on `specs`, so callers may cache it;
/// [`OptionCatalog`](crate::OptionCatalog) does so at construction.
///
/// Lines stay within [`HELP_WIDTH`] unless a single word or the label column
/// is already too wide. When the description column starts at or past
/// [`HELP_WIDTH`], descriptions are emitted unwrapped on the label line.
pub fn render_help(specs: &[OptionSpec]) -> String {
    let labels: Vec<String> = specs.iter().map(option_label).collect();
    let max_label = labels.iter().map(|label| width(label)).max().unwrap_or(0);
    let desc_col = LABEL_INDENT + max_label + 1;
    let wrap = desc_col < HELP_WIDTH;

    let mut out = String::new();
    for (spec, label) in specs.iter().zip(&labels) {
        out.push_str(&" ".repeat(LABEL_INDENT));
        out.push_str(label);

        let mut words = spec.description.split_whitespace();
        if let Some(first) = words.next() {
            out.push_str(&" ".repeat(max_label - width(label) + 1));
            out.push_str(first);
            let mut col = desc_col + width(first);

            for word in words {
                let len = width(word);
                if wrap && col + 1 + len > HELP_WIDTH && col > desc_col {
                    out.push('\n');
                    out.push_str(&" ".repeat(desc_col));
                    out.push_str(word);
                    col = desc_col + len;
                } else {
                    out.push(' ');
                    out.push_str(word);
                    col += 1 + len;
                }
            }
        }

        out.push('\n');
    }

    out
}
