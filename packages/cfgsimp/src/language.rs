use std::fmt::Display;

use derive_more::Display;
use itertools::Itertools;

/// Marker for the empty string. Never a member of any alphabet.
pub const EPSILON: &str = "ε";
pub const EPSILON_CHAR: char = 'ε';

/// A single-character grammar symbol.
///
/// Symbols are deliberately limited to one character: the rule syntax has no
/// separators between symbols, so `aB` is always the two symbols `a` and `B`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(char);

impl Symbol {
    pub fn new(c: char) -> Self {
        assert!(c != EPSILON_CHAR, "ε is not a symbol");
        Symbol(c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word<S>(pub Vec<S>);

impl<S> Word<S> {
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Self {
        Word(symbols.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.0.iter()
    }
}

impl<S: Display> Display for Word<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "{EPSILON}")
        } else {
            write!(f, "{}", self.0.iter().join(""))
        }
    }
}
