//! Reading grammars from their textual form.
//!
//! One rule per line, e.g. `S → 0A0 | 1B1 | ε`. `->` is accepted as an arrow
//! too, blank lines and `#` comments are skipped, and the left-hand side of
//! the first rule becomes the start symbol.

use std::{fs, path::Path};

use log::{debug, info, warn};
use winnow::{
    ascii::space0,
    combinator::{alt, delimited, repeat, separated},
    error::{ContextError, ParseError, StrContext, StrContextValue},
    prelude::*,
    token::{any, one_of},
};

use crate::{
    error::{LoadError, ValidationError},
    grammars::{Alternative, ContextFreeGrammar, NonTerminal, ProductionSymbol},
    language::{Word, EPSILON_CHAR},
};

#[derive(Debug)]
struct Rule {
    lhs: NonTerminal,
    alternatives: Vec<Alternative>,
}

fn non_terminal(input: &mut &str) -> ModalResult<NonTerminal> {
    one_of(|c: char| c.is_ascii_uppercase())
        .map(NonTerminal::new)
        .context(StrContext::Label("left-hand side"))
        .context(StrContext::Expected(StrContextValue::Description(
            "an uppercase non-terminal",
        )))
        .parse_next(input)
}

fn arrow(input: &mut &str) -> ModalResult<()> {
    alt(("→", "->"))
        .void()
        .context(StrContext::Label("arrow"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("→")))
        .parse_next(input)
}

fn production_symbol(input: &mut &str) -> ModalResult<ProductionSymbol> {
    any.verify_map(ProductionSymbol::classify)
        .context(StrContext::Label("symbol"))
        .parse_next(input)
}

fn alternative(input: &mut &str) -> ModalResult<Alternative> {
    alt((
        EPSILON_CHAR.value(Alternative::Epsilon),
        repeat(1.., production_symbol)
            .map(|symbols: Vec<ProductionSymbol>| Alternative::Word(Word(symbols))),
    ))
    .context(StrContext::Label("alternative"))
    .context(StrContext::Expected(StrContextValue::Description(
        "ε or a run of letters and digits",
    )))
    .parse_next(input)
}

fn rule(input: &mut &str) -> ModalResult<Rule> {
    let lhs = delimited(space0, non_terminal, space0).parse_next(input)?;
    arrow.parse_next(input)?;
    let alternatives: Vec<Alternative> =
        separated(1.., delimited(space0, alternative, space0), '|').parse_next(input)?;

    Ok(Rule { lhs, alternatives })
}

fn describe(line: &str, error: &ParseError<&str, ContextError>) -> String {
    let offset = error.offset();
    let column = line[..offset].chars().count() + 1;
    let found = line[offset..]
        .chars()
        .next()
        .map_or_else(|| "end of line".to_owned(), |c| format!("`{c}`"));

    let reason = error.inner().to_string().replace('\n', ", ");
    if reason.is_empty() {
        format!("unexpected {found} at column {column}")
    } else {
        format!("{reason}; found {found} at column {column}")
    }
}

/// Parses every rule line, collecting the rejected ones instead of stopping.
fn parse_rules(source: &str) -> (Vec<Rule>, Vec<ValidationError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match rule.parse(line) {
            Ok(rule) => rules.push(rule),
            Err(error) => errors.push(ValidationError {
                line: idx + 1,
                content: line.to_owned(),
                message: describe(line, &error),
            }),
        }
    }

    (rules, errors)
}

/// Checks the syntax of every rule line without building a grammar.
pub fn validate_source(source: &str) -> Vec<ValidationError> {
    parse_rules(source).1
}

pub fn parse_grammar(source: &str) -> Result<ContextFreeGrammar, LoadError> {
    let (rules, errors) = parse_rules(source);

    if !errors.is_empty() {
        for error in &errors {
            debug!("Rejected {}", error);
        }
        return Err(LoadError::Invalid(errors));
    }

    let mut grammar = ContextFreeGrammar::new();

    for Rule { lhs, alternatives } in rules {
        if grammar.start_symbol().is_none() {
            grammar.set_start(lhs);
        }

        for alternative in alternatives {
            grammar.add_production(lhs, alternative);
        }
    }

    if grammar.start_symbol().is_none() {
        return Err(LoadError::NoRules);
    }

    for nt in grammar.undefined_non_terminals() {
        warn!("Non-terminal {} is used but has no productions", nt);
    }

    debug!(
        "Parsed grammar with {} productions, {} non-terminals, {} terminals",
        grammar.production_count(),
        grammar.non_terminals().len(),
        grammar.terminals().len()
    );

    Ok(grammar)
}

pub fn load_grammar(path: impl AsRef<Path>) -> Result<ContextFreeGrammar, LoadError> {
    let path = path.as_ref();
    info!("Loading grammar from `{}`", path.display());

    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    parse_grammar(&source)
}

pub(crate) fn parse_alternative(s: &str) -> Result<Alternative, String> {
    alternative.parse(s).map_err(|error| describe(s, &error))
}
