//! Removes ε-productions from context-free grammars stored in text files.

mod samples;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cfgsimp::{loader::load_grammar, storage};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use itertools::Itertools;
use log::{error, LevelFilter};
use tabled::{builder::Builder, settings::Style};

const RULE_SYNTAX: &str = "\
Grammar files hold one rule per line, e.g. `S → 0A0 | 1B1 | ε`.
  - the left-hand side is a single uppercase letter
  - `→` or `->` separates it from the alternatives, `|` separates alternatives
  - uppercase letters are non-terminals, lowercase letters and digits terminals
  - `ε` alone is the empty alternative
  - blank lines and lines starting with `#` are ignored
The left-hand side of the first rule is the start symbol.";

fn cli() -> Command {
    Command::new("cfgsimp")
        .version(clap::crate_version!())
        .about("Eliminates ε-productions from context-free grammars.")
        .after_long_help(RULE_SYNTAX)
        .arg(
            Arg::new("grammar")
                .help("Grammar files to simplify")
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Where to write simplified grammars (defaults to next to the input)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-save")
                .short('n')
                .long("no-save")
                .help("Do not write simplified grammars to disk")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("init-samples")
                .long("init-samples")
                .value_name("DIR")
                .help("Create the sample grammars in DIR (if missing) and process them")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
}

struct Options {
    output_dir: Option<PathBuf>,
    save: bool,
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Self {
        Options {
            output_dir: matches.get_one::<PathBuf>("output-dir").cloned(),
            save: !matches.get_flag("no-save"),
        }
    }
}

fn process(path: &Path, options: &Options) -> Result<()> {
    let original =
        load_grammar(path).with_context(|| format!("failed to load `{}`", path.display()))?;
    println!("Original grammar:\n{}", original.definition());

    let result = original.eliminate_epsilon_productions()?;
    println!(
        "Nullable symbols: {{{}}}\n",
        result.nullable.iter().sorted().join(", ")
    );
    println!("Grammar without ε-productions:\n{}", result.grammar.definition());
    println!("{}\n", result.statistics(&original));

    if options.save {
        let output = storage::output_path(path, options.output_dir.as_deref());
        storage::save_grammar(&output, &result.grammar)
            .with_context(|| format!("failed to save `{}`", output.display()))?;
        println!("Saved to `{}`", output.display());
    }

    Ok(())
}

fn summary(outcomes: &[(&Path, bool)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Grammar", "Status"]);
    for (path, ok) in outcomes {
        builder.push_record([
            path.display().to_string(),
            (if *ok { "ok" } else { "failed" }).to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!(
        "{}\nProcessed {}/{}",
        table,
        outcomes.iter().filter(|(_, ok)| *ok).count(),
        outcomes.len()
    )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let mut paths = matches
        .get_many::<PathBuf>("grammar")
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>();

    if let Some(dir) = matches.get_one::<PathBuf>("init-samples") {
        paths.extend(samples::write_samples(dir)?);
    }

    if paths.is_empty() {
        bail!("no grammar files given; pass some paths or `--init-samples <DIR>`");
    }

    let options = Options::from_matches(&matches);
    let rule = "=".repeat(60);

    let mut outcomes = Vec::with_capacity(paths.len());
    for path in &paths {
        println!("{rule}\n{}\n{rule}", path.display());

        let outcome = process(path, &options);
        if let Err(err) = &outcome {
            error!("{:#}", err);
        }
        outcomes.push((path.as_path(), outcome.is_ok()));
    }

    println!("{}", summary(&outcomes));

    let failed = outcomes.iter().filter(|(_, ok)| !ok).count();
    if failed > 0 {
        bail!("{} of {} grammars failed", failed, outcomes.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let matches = cli()
            .try_get_matches_from(["cfgsimp", "-n", "-vv", "-o", "out", "a.txt", "b.txt"])
            .unwrap();
        let options = Options::from_matches(&matches);

        assert!(!options.save);
        assert_eq!(options.output_dir, Some(PathBuf::from("out")));
        assert_eq!(matches.get_count("verbose"), 2);
        assert_eq!(matches.get_many::<PathBuf>("grammar").unwrap().count(), 2);
    }

    #[test]
    fn summary_counts_successes() {
        let table = summary(&[(Path::new("a.txt"), true), (Path::new("b.txt"), false)]);

        assert!(table.contains("failed"));
        assert!(table.ends_with("Processed 1/2"));
    }
}
