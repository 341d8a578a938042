use std::path::PathBuf;

use derive_more::{Display, Error};
use itertools::Itertools;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrammarError {
    #[display("the grammar has no start symbol")]
    UndefinedStartSymbol,
}

/// A rule line the loader rejected.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("line {line}: {message} in `{content}`")]
pub struct ValidationError {
    /// 1-based line number in the source.
    pub line: usize,
    pub content: String,
    pub message: String,
}

#[derive(Debug, Display, Error)]
pub enum LoadError {
    #[display("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("{} invalid line(s):\n  {}", _0.len(), _0.iter().join("\n  "))]
    Invalid(#[error(not(source))] Vec<ValidationError>),
    #[display("the grammar contains no rules")]
    NoRules,
}

impl LoadError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            LoadError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
