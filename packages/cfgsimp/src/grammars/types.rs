use std::str::FromStr;

use derive_more::Display;

use crate::language::{Symbol, Word};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub Symbol);

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub Symbol);

impl Terminal {
    pub fn new(c: char) -> Self {
        Terminal(Symbol::new(c))
    }
}

impl NonTerminal {
    pub fn new(c: char) -> Self {
        NonTerminal(Symbol::new(c))
    }
}

/// A right-hand side symbol, tagged once when the grammar is built.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductionSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl ProductionSymbol {
    /// Uppercase ASCII letters are non-terminals, lowercase ASCII letters and
    /// digits are terminals. Anything else is not a symbol.
    pub fn classify(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(ProductionSymbol::NonTerminal(NonTerminal::new(c)))
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            Some(ProductionSymbol::Terminal(Terminal::new(c)))
        } else {
            None
        }
    }
}

/// One alternative of a production: the explicit ε marker or a non-empty word.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum Alternative {
    #[display("ε")]
    Epsilon,
    #[display("{_0}")]
    Word(Word<ProductionSymbol>),
}

impl Alternative {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Alternative::Epsilon)
    }

    pub fn symbols(&self) -> &[ProductionSymbol] {
        match self {
            Alternative::Epsilon => &[],
            Alternative::Word(word) => &word.0,
        }
    }
}

impl FromStr for Alternative {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::loader::parse_alternative(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_case() {
        assert_eq!(
            ProductionSymbol::classify('A'),
            Some(ProductionSymbol::NonTerminal(NonTerminal::new('A')))
        );
        assert_eq!(
            ProductionSymbol::classify('a'),
            Some(ProductionSymbol::Terminal(Terminal::new('a')))
        );
        assert_eq!(
            ProductionSymbol::classify('0'),
            Some(ProductionSymbol::Terminal(Terminal::new('0')))
        );
        assert_eq!(ProductionSymbol::classify('ε'), None);
        assert_eq!(ProductionSymbol::classify('+'), None);
    }

    #[test]
    fn alternative_from_str() {
        let alt: Alternative = "0A0".parse().unwrap();
        assert_eq!(alt.symbols().len(), 3);
        assert_eq!(alt.to_string(), "0A0");

        assert_eq!("ε".parse::<Alternative>().unwrap(), Alternative::Epsilon);
        assert!("".parse::<Alternative>().is_err());
        assert!("aε".parse::<Alternative>().is_err());
        assert!("a b".parse::<Alternative>().is_err());
    }
}
