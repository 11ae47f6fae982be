use optscan_core::{
    OptionCatalog, OptionSpec, ParseError, ParsedOption, StopCondition, help::HELP_WIDTH,
};

const LONG_ONLY: u32 = 1001;
const LONG_DESCRIPTION: u32 = 1002;

fn main_catalog() -> OptionCatalog {
    OptionCatalog::new(vec![
        OptionSpec::flag('h', Some("help")).with_description("help"),
        OptionSpec::flag('v', Some("verbose")).with_description("verbose"),
        OptionSpec::required('o', Some("output"))
            .with_description("output")
            .with_placeholder("file"),
        OptionSpec::optional('p', Some("param")).with_description("param"),
        OptionSpec::flag(LONG_ONLY, Some("long-only")).with_description("long-only"),
        OptionSpec::flag('s', Some("")).with_description("short-only"),
        OptionSpec::required(LONG_DESCRIPTION, Some("long-description")).with_description(
            "This item has an extremely long description, which is expected to wrap at \
             80-character lines for easy display in a terminal. If it fails to do this, \
             it is not functioning properly.",
        ),
    ])
    .expect("main catalog is valid")
}

fn sub_catalog() -> OptionCatalog {
    OptionCatalog::new(vec![
        OptionSpec::flag('a', Some("alpha")).with_description("alpha"),
        OptionSpec::required('b', Some("beta"))
            .with_description("beta")
            .with_placeholder("value"),
    ])
    .expect("sub catalog is valid")
}

fn only_option<'a>(options: &[ParsedOption<'a>], id: char) -> ParsedOption<'a> {
    let matching: Vec<_> = options.iter().filter(|opt| opt.short() == Some(id)).collect();
    assert_eq!(matching.len(), 1, "expected exactly one -{id}");
    *matching[0]
}

// ---------------------------------------------------------------------------
// Help text
// ---------------------------------------------------------------------------

#[test]
fn help_text_lists_options() {
    let catalog = main_catalog();
    let help = catalog.help_text();
    assert!(!help.is_empty());
    assert!(help.contains("--help"));
    assert!(help.contains("--output"));
}

#[test]
fn help_text_lines_fit_terminal_width() {
    let catalog = main_catalog();
    for line in catalog.help_text().lines() {
        assert!(line.len() <= HELP_WIDTH, "line exceeds {HELP_WIDTH}: {line:?}");
    }
}

#[test]
fn help_text_contains_every_label() {
    let catalog = main_catalog();
    for spec in &catalog {
        let label = optscan_core::help::option_label(spec);
        assert!(catalog.help_text().contains(&label), "missing {label:?}");
    }
}

// ---------------------------------------------------------------------------
// Parsing everything
// ---------------------------------------------------------------------------

#[test]
fn parse_short_and_long() {
    let catalog = main_catalog();
    let args = ["-h", "--verbose", "--output", "out.txt"];
    let seq = catalog.parse(&args).unwrap();

    let ids: Vec<u32> = seq.iter().map(ParsedOption::id).collect();
    assert_eq!(ids, vec!['h' as u32, 'v' as u32, 'o' as u32]);
    assert_eq!(seq[2].argument(), Some("out.txt"));
    assert!(seq.positionals().is_empty());
}

#[test]
fn parse_required_argument_forms_agree() {
    let catalog = main_catalog();
    let forms: [&[&str]; 3] = [&["-oout.txt"], &["--output=out.txt"], &["--output", "out.txt"]];

    for args in forms {
        let seq = catalog.parse(args).unwrap();
        assert_eq!(seq.len(), 1, "{args:?}");
        let output = only_option(seq.options(), 'o');
        assert_eq!(output.argument(), Some("out.txt"), "{args:?}");
    }
}

#[test]
fn parse_optional_argument() {
    let catalog = main_catalog();

    let seq = catalog.parse(&["--param"]).unwrap();
    assert!(!only_option(seq.options(), 'p').has_argument());

    let seq = catalog.parse(&["--param=zzz"]).unwrap();
    assert_eq!(only_option(seq.options(), 'p').argument(), Some("zzz"));

    // A detached token never binds to a long optional argument.
    let seq = catalog.parse(&["--param", "zzz"]).unwrap();
    assert!(!only_option(seq.options(), 'p').has_argument());
    assert_eq!(seq.positionals(), ["zzz"]);

    let seq = catalog.parse(&["-pzzz"]).unwrap();
    assert_eq!(only_option(seq.options(), 'p').argument(), Some("zzz"));

    let seq = catalog.parse(&["-p", "zzz"]).unwrap();
    assert_eq!(only_option(seq.options(), 'p').argument(), Some("zzz"));
    assert!(seq.positionals().is_empty());
}

#[test]
fn parse_long_only_and_short_only() {
    let catalog = main_catalog();
    let seq = catalog.parse(&["--long-only", "-s"]).unwrap();
    assert!(seq.has_option(LONG_ONLY));
    assert!(seq.has_option('s'));
}

#[test]
fn option_clustering() {
    let catalog = main_catalog();
    let seq = catalog.parse(&["-vh"]).unwrap();
    assert!(seq.has_option('v'));
    assert!(seq.has_option('h'));
}

#[test]
fn cluster_ends_at_argument_option() {
    let catalog = main_catalog();
    let seq = catalog.parse(&["-vovh"]).unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.value_of('o'), Some("vh"));
    assert!(!seq.has_option('h'));
}

#[test]
fn non_option_arguments_are_collected() {
    let catalog = main_catalog();
    let seq = catalog.parse(&["file1", "-v", "file2"]).unwrap();
    assert!(seq.has_option('v'));
    assert_eq!(seq.positionals(), ["file1", "file2"]);
}

#[test]
fn repeated_parses_do_not_share_state() {
    let catalog = main_catalog();
    let first = ["-v", "--"];
    let second = ["-h"];

    let s1 = catalog.parse(&first).unwrap();
    let s2 = catalog.parse(&second).unwrap();
    assert!(s1.has_option('v'));
    assert!(!s1.has_option('h'));
    assert!(s2.has_option('h'));
    assert!(!s2.has_option('v'));
}

#[test]
fn double_dash_collects_remaining_as_positionals() {
    let catalog = main_catalog();
    let seq = catalog.parse(&["-v", "--", "file1", "-h"]).unwrap();
    assert!(seq.has_option('v'));
    assert!(!seq.has_option('h'));
    assert_eq!(seq.positionals(), ["file1", "-h"]);
}

#[test]
fn owned_arguments_are_borrowed_not_copied() {
    let catalog = main_catalog();
    let args: Vec<String> = ["--output", "out.txt", "rest"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let seq = catalog.parse(&args).unwrap();

    let value = seq.value_of('o').unwrap();
    assert!(std::ptr::eq(value, args[1].as_str()));
    assert!(std::ptr::eq(seq.positionals()[0], args[2].as_str()));
}

#[test]
fn parse_errors_on_unknown_and_missing_argument() {
    let catalog = main_catalog();

    let err = catalog.parse(&["--does-not-exist"]).unwrap_err();
    assert!(matches!(err, ParseError::UnknownOption { .. }));
    assert_eq!(err.to_string(), "unknown option: --does-not-exist");

    let err = catalog.parse(&["--output"]).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingArgument {
            option: "-o".to_string(),
            index: 0,
        }
    );

    let err = catalog.parse(&["-v", "--long-description"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required argument for option: --long-description"
    );
    assert_eq!(err.index(), Some(1));

    let err = catalog.parse(&["--help=yes"]).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedArgument { .. }));
}

#[test]
fn error_kind_does_not_depend_on_cluster_neighbours() {
    let catalog = main_catalog();
    for args in [["-o"], ["-vo"], ["-hvo"]] {
        let err = catalog.parse(&args).unwrap_err();
        assert!(
            matches!(err, ParseError::MissingArgument { ref option, index: 0 } if option == "-o"),
            "{args:?}: {err:?}"
        );
    }
    for args in [["-z"], ["-vz"], ["-hvz"]] {
        let err = catalog.parse(&args).unwrap_err();
        assert!(
            matches!(err, ParseError::UnknownOption { ref name, index: 0, .. } if name == "-z"),
            "{args:?}: {err:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Stop policies
// ---------------------------------------------------------------------------

#[test]
fn before_first_positional_subcommand_pattern() {
    let global = main_catalog();
    let sub = sub_catalog();

    let args = ["-v", "subcmd", "-a", "--beta", "B"];
    let (gopts, rem) = global
        .parse_until(&args, StopCondition::BeforeFirstPositional)
        .unwrap();
    assert!(gopts.has_option('v'));
    assert!(gopts.positionals().is_empty());
    assert_eq!(rem.first(), Some("subcmd"));

    let subopts = sub.parse(rem.advance(1).args()).unwrap();
    assert!(subopts.has_option('a'));
    assert_eq!(only_option(subopts.options(), 'b').argument(), Some("B"));
}

#[test]
fn before_first_positional_remainder() {
    let catalog = main_catalog();
    let (opts, rem) = catalog
        .parse_until(&["-v", "cmd", "-a"], StopCondition::BeforeFirstPositional)
        .unwrap();
    assert_eq!(opts.len(), 1);
    assert!(opts.has_option('v'));
    assert_eq!(rem.len(), 2);
    assert_eq!(rem.first(), Some("cmd"));
}

#[test]
fn after_first_positional_consumes_one_positional() {
    let catalog = main_catalog();
    let (opts, rem) = catalog
        .parse_until(
            &["-v", "cmd", "--output", "x"],
            StopCondition::AfterFirstPositional,
        )
        .unwrap();
    assert!(opts.has_option('v'));
    assert!(!opts.has_option('o'));
    assert_eq!(opts.positionals(), ["cmd"]);
    assert_eq!(rem.first(), Some("--output"));
    assert_eq!(rem.len(), 2);
}

#[test]
fn multiple_parses_combine() {
    let catalog = main_catalog();
    let args = ["-v", "file1", "--output", "out.txt", "file2", "-h"];

    let mut total = optscan_core::ResultSet::new();
    let mut remaining: &[&str] = &args;
    for _ in 0..2 {
        let (opts, rem) = catalog
            .parse_until(remaining, StopCondition::AfterFirstPositional)
            .unwrap();
        total += opts;
        remaining = rem.args();
    }

    assert!(total.has_option('v'));
    assert!(!total.has_option('h'));
    assert_eq!(only_option(total.options(), 'o').argument(), Some("out.txt"));
    assert_eq!(total.positionals(), ["file1", "file2"]);
    assert_eq!(remaining, ["-h"]);
}

#[test]
fn before_first_error_returns_remainder() {
    let catalog = main_catalog();

    // unknown option
    let (opts, rem) = catalog
        .parse_until(&["-v", "--nope", "zzz"], StopCondition::BeforeFirstError)
        .unwrap();
    assert!(opts.has_option('v'));
    assert_eq!(rem.first(), Some("--nope"));
    assert_eq!(rem.len(), 2);

    // missing required argument
    let (opts, rem) = catalog
        .parse_until(&["--output"], StopCondition::BeforeFirstError)
        .unwrap();
    assert!(opts.is_empty());
    assert_eq!(rem.first(), Some("--output"));

    // clustered short options, error mid-token
    let (opts, rem) = catalog
        .parse_until(&["-vz"], StopCondition::BeforeFirstError)
        .unwrap();
    assert!(opts.has_option('v'));
    assert_eq!(rem.first(), Some("-vz"));

    // clustered short options, missing required argument
    let (opts, rem) = catalog
        .parse_until(&["-vo"], StopCondition::BeforeFirstError)
        .unwrap();
    assert!(opts.has_option('v'));
    assert_eq!(rem.first(), Some("-vo"));
}

#[test]
fn before_first_error_without_errors_scans_everything() {
    let catalog = main_catalog();
    let (opts, rem) = catalog
        .parse_until(&["a", "-v", "--", "-x"], StopCondition::BeforeFirstError)
        .unwrap();
    assert!(opts.has_option('v'));
    assert_eq!(opts.positionals(), ["a", "-x"]);
    assert!(rem.is_empty());
}

#[test]
fn catalog_is_shareable_across_threads() {
    let catalog = std::sync::Arc::new(main_catalog());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let catalog = std::sync::Arc::clone(&catalog);
            std::thread::spawn(move || {
                let args = vec!["-v".to_string(), format!("file{i}")];
                let seq = catalog.parse(&args).unwrap();
                (seq.len(), seq.positionals()[0].to_string())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (count, positional) = handle.join().unwrap();
        assert_eq!(count, 1);
        assert_eq!(positional, format!("file{i}"));
    }
}
