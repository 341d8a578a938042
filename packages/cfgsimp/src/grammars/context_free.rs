use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    error::LoadError,
    grammars::types::{Alternative, NonTerminal, ProductionSymbol, Terminal},
    loader,
};

/// A context-free grammar over single-character symbols.
///
/// Alternatives are kept per non-terminal in insertion order and deduplicated.
/// The alphabets record every symbol ever mentioned, whether or not it still
/// has productions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextFreeGrammar {
    pub(super) start_symbol: Option<NonTerminal>,
    pub(super) terminals: IndexSet<Terminal>,
    pub(super) non_terminals: IndexSet<NonTerminal>,
    pub(super) productions: IndexMap<NonTerminal, IndexSet<Alternative>>,
}

impl ContextFreeGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(start_symbol: NonTerminal) -> Self {
        let mut grammar = Self::new();
        grammar.set_start(start_symbol);
        grammar
    }

    /// Parses `A → ...` lines with an explicit start symbol.
    pub fn from_productions(
        start_symbol: char,
        productions: &[impl AsRef<str>],
    ) -> Result<Self, LoadError> {
        let source = productions.iter().map(AsRef::as_ref).join("\n");
        let mut grammar = loader::parse_grammar(&source)?;
        grammar.set_start(NonTerminal::new(start_symbol));

        Ok(grammar)
    }

    pub fn start_symbol(&self) -> Option<&NonTerminal> {
        self.start_symbol.as_ref()
    }

    pub fn terminals(&self) -> &IndexSet<Terminal> {
        &self.terminals
    }

    pub fn non_terminals(&self) -> &IndexSet<NonTerminal> {
        &self.non_terminals
    }

    pub fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<Alternative>> {
        &self.productions
    }

    pub fn alternatives(&self, non_terminal: &NonTerminal) -> Option<&IndexSet<Alternative>> {
        self.productions.get(non_terminal)
    }

    /// Total number of alternatives over all non-terminals.
    pub fn production_count(&self) -> usize {
        self.productions.values().map(IndexSet::len).sum()
    }

    pub fn set_start(&mut self, start_symbol: NonTerminal) {
        self.non_terminals.insert(start_symbol);
        self.start_symbol = Some(start_symbol);
    }

    pub fn add_production(&mut self, lhs: NonTerminal, rhs: Alternative) {
        self.non_terminals.insert(lhs);

        for symbol in rhs.symbols() {
            match symbol {
                ProductionSymbol::Terminal(t) => {
                    self.terminals.insert(*t);
                }
                ProductionSymbol::NonTerminal(nt) => {
                    self.non_terminals.insert(*nt);
                }
            }
        }

        self.productions
            .entry(lhs)
            .or_insert_with(IndexSet::new)
            .insert(rhs);
    }

    /// Non-terminals that derive the empty string, directly or transitively.
    pub fn nullable_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut nullable = self
            .productions
            .iter()
            .filter(|(_, rhs)| rhs.contains(&Alternative::Epsilon))
            .map(|(lhs, _)| *lhs)
            .collect::<IndexSet<_>>();

        trace!("Directly nullable: {{{}}}", nullable.iter().join(", "));

        let mut pass = 0;
        loop {
            pass += 1;
            let mut changed = false;

            'outer: for (lhs, rhs) in &self.productions {
                if nullable.contains(lhs) {
                    continue;
                }

                for alternative in rhs {
                    let is_lhs_nullable = alternative.symbols().iter().all(|symbol| match symbol {
                        ProductionSymbol::NonTerminal(nt) => nullable.contains(nt),
                        ProductionSymbol::Terminal(_) => false,
                    });

                    if is_lhs_nullable {
                        trace!("Pass {}: {} is nullable via {} → {}", pass, lhs, lhs, alternative);
                        nullable.insert(*lhs);

                        changed = true;
                        continue 'outer;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        debug!(
            "Nullable set {{{}}} found after {} passes",
            nullable.iter().join(", "),
            pass
        );

        nullable
    }

    /// Non-terminals mentioned somewhere without a single production.
    pub fn undefined_non_terminals(&self) -> IndexSet<NonTerminal> {
        self.non_terminals
            .iter()
            .filter(|nt| !self.productions.contains_key(*nt))
            .copied()
            .collect()
    }

    /// Productions ordered with the start symbol first, then by symbol.
    fn ordered_productions(&self) -> Vec<(&NonTerminal, &IndexSet<Alternative>)> {
        self.productions
            .iter()
            .sorted_by_key(|(nt, _)| (self.start_symbol.as_ref() != Some(*nt), **nt))
            .collect()
    }

    pub fn definition(&self) -> String {
        let mut non_terminals = self.non_terminals.clone();
        non_terminals.sort_by(|a, b| {
            if Some(a) == self.start_symbol.as_ref() {
                return std::cmp::Ordering::Less;
            }
            if Some(b) == self.start_symbol.as_ref() {
                return std::cmp::Ordering::Greater;
            }
            a.cmp(b)
        });

        let mut terminals = self.terminals.clone();
        terminals.sort();

        let mut definition = format!(
            "G = ({{{}}}, {{{}}}, P, {})\n\n",
            non_terminals.iter().join(", "),
            terminals.iter().join(", "),
            self.start_symbol
                .map_or_else(|| "?".to_owned(), |s| s.to_string())
        );

        definition += "P = {\n";

        for (lhs, rhs) in self.ordered_productions() {
            definition += &format!("  {} → {}\n", lhs, rhs.iter().join(" | "));
        }

        definition += "}\n";

        definition
    }
}

/// Renders the grammar in the same rule syntax the loader accepts.
impl Display for ContextFreeGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lhs, rhs) in self.ordered_productions() {
            writeln!(f, "{} → {}", lhs, rhs.iter().join(" | "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexset;

    use super::*;

    fn nt(c: char) -> NonTerminal {
        NonTerminal::new(c)
    }

    #[test]
    fn add_production_registers_symbols() {
        let mut g = ContextFreeGrammar::new();
        g.add_production(nt('S'), "aB0".parse().unwrap());
        g.add_production(nt('S'), Alternative::Epsilon);

        assert_eq!(g.non_terminals(), &indexset! {nt('S'), nt('B')});
        assert_eq!(
            g.terminals(),
            &indexset! {Terminal::new('a'), Terminal::new('0')}
        );
        assert_eq!(g.production_count(), 2);
        assert_eq!(g.start_symbol(), None);
    }

    #[test]
    fn duplicate_alternatives_are_merged() {
        let mut g = ContextFreeGrammar::new();
        g.add_production(nt('S'), "ab".parse().unwrap());
        g.add_production(nt('S'), "ab".parse().unwrap());

        assert_eq!(g.alternatives(&nt('S')).unwrap().len(), 1);
    }

    #[test]
    fn start_without_productions_is_registered() {
        let g = ContextFreeGrammar::with_start(nt('S'));

        assert_eq!(g.start_symbol(), Some(&nt('S')));
        assert!(g.non_terminals().contains(&nt('S')));
        assert!(g.productions().is_empty());
        assert_eq!(g.undefined_non_terminals(), indexset! {nt('S')});
    }

    #[test]
    fn chained_nullability() {
        let g = ContextFreeGrammar::from_productions('A', &["A → B", "B → C", "C → ε"]).unwrap();

        assert_eq!(
            g.nullable_non_terminals(),
            indexset! {nt('A'), nt('B'), nt('C')}
        );
    }

    #[test]
    fn terminals_block_nullability() {
        let g = ContextFreeGrammar::from_productions(
            'S',
            &["S → aA | AB", "A → ε | a", "B → b", "C → AA"],
        )
        .unwrap();

        assert_eq!(g.nullable_non_terminals(), indexset! {nt('A'), nt('C')});
    }

    #[test]
    fn nullable_set_of_first_sample() {
        let g = ContextFreeGrammar::from_productions(
            'S',
            &["S → 0A0 | 1B1 | BB", "A → C", "B → S | A", "C → S | ε"],
        )
        .unwrap();

        // S only becomes nullable once B is known to be, through S → BB.
        assert_eq!(
            g.nullable_non_terminals(),
            indexset! {nt('C'), nt('A'), nt('B'), nt('S')}
        );
    }

    #[test]
    fn recursion_without_base_case_is_not_nullable() {
        let g = ContextFreeGrammar::from_productions('S', &["S → SS | a"]).unwrap();

        assert!(g.nullable_non_terminals().is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let original = ContextFreeGrammar::from_productions('S', &["S → aS | b"]).unwrap();
        let mut copy = original.clone();
        copy.add_production(nt('T'), "c".parse().unwrap());

        assert!(!original.non_terminals().contains(&nt('T')));
        assert!(!original.terminals().contains(&Terminal::new('c')));
        assert_eq!(original.production_count(), 2);
    }

    #[test]
    fn display_puts_start_first() {
        let g = ContextFreeGrammar::from_productions('S', &["B → b", "S → aB | ε", "A → a"])
            .unwrap();

        assert_eq!(g.to_string(), "S → aB | ε\nA → a\nB → b\n");
    }

    #[test]
    fn definition_lists_alphabets() {
        let g = ContextFreeGrammar::from_productions('S', &["S → aB", "B → b | 0"]).unwrap();

        assert_eq!(
            g.definition(),
            "G = ({S, B}, {0, a, b}, P, S)\n\nP = {\n  S → aB\n  B → b | 0\n}\n"
        );
    }
}
