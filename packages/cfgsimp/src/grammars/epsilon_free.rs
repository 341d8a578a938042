use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, trace};
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::GrammarError,
    grammars::{
        context_free::ContextFreeGrammar,
        types::{Alternative, NonTerminal, ProductionSymbol},
    },
    language::Word,
};

/// Outcome of a single ε-elimination run.
#[derive(Debug, Clone)]
pub struct EpsilonElimination {
    /// The rewritten grammar. Only the start symbol may still have `ε`.
    pub grammar: ContextFreeGrammar,
    /// Nullable set of the input grammar.
    pub nullable: IndexSet<NonTerminal>,
}

impl EpsilonElimination {
    pub fn statistics(&self, original: &ContextFreeGrammar) -> SimplificationStatistics {
        SimplificationStatistics {
            original_productions: original.production_count(),
            simplified_productions: self.grammar.production_count(),
            nullable_symbols: self.nullable.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplificationStatistics {
    pub original_productions: usize,
    pub simplified_productions: usize,
    pub nullable_symbols: usize,
}

impl SimplificationStatistics {
    /// Negative when elimination produced more alternatives than it removed.
    pub fn reduction(&self) -> isize {
        self.original_productions as isize - self.simplified_productions as isize
    }
}

impl Display for SimplificationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();

        for (label, value) in [
            ("Original productions", self.original_productions as isize),
            ("Simplified productions", self.simplified_productions as isize),
            ("Nullable symbols", self.nullable_symbols as isize),
            ("Reduction", self.reduction()),
        ] {
            builder.push_record([label.to_string(), value.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        write!(f, "{}", table)
    }
}

/// Every way of keeping or dropping each nullable occurrence in `word`.
///
/// With `k` nullable occurrences this yields exactly `2^k` words, duplicates
/// and the empty word included.
pub fn variants(
    word: &Word<ProductionSymbol>,
    nullable: &IndexSet<NonTerminal>,
) -> Vec<Word<ProductionSymbol>> {
    word.iter()
        .copied()
        .map(|symbol| match symbol {
            ProductionSymbol::NonTerminal(nt) if nullable.contains(&nt) => {
                vec![Some(symbol), None]
            }
            _ => vec![Some(symbol)],
        })
        .multi_cartesian_product()
        .map(|choice| Word::new(choice.into_iter().flatten()))
        .collect()
}

impl ContextFreeGrammar {
    /// Builds an equivalent grammar without ε-productions.
    ///
    /// The result generates the same language minus the empty string. If the
    /// start symbol is nullable, the empty string is kept through a single
    /// explicit `S → ε`. The input is left untouched.
    pub fn eliminate_epsilon_productions(&self) -> Result<EpsilonElimination, GrammarError> {
        let start_symbol = self
            .start_symbol
            .ok_or(GrammarError::UndefinedStartSymbol)?;

        let nullable = self.nullable_non_terminals();

        let mut grammar = ContextFreeGrammar {
            start_symbol: Some(start_symbol),
            terminals: self.terminals.clone(),
            non_terminals: self.non_terminals.clone(),
            productions: IndexMap::with_capacity(self.productions.len()),
        };

        for (lhs, rhs) in &self.productions {
            let mut next_productions = IndexSet::new();

            for alternative in rhs {
                let Alternative::Word(word) = alternative else {
                    trace!("Dropping {} → ε", lhs);
                    continue;
                };

                let words = variants(word, &nullable);
                trace!("{} → {} expands to {} variants", lhs, word, words.len());

                next_productions.extend(
                    words
                        .into_iter()
                        .filter(|word| !word.is_empty())
                        .map(Alternative::Word),
                );
            }

            if *lhs == start_symbol && nullable.contains(lhs) {
                next_productions.insert(Alternative::Epsilon);
            }

            if next_productions.is_empty() {
                debug!("{} has no alternatives left and is dropped", lhs);
                continue;
            }

            grammar.productions.insert(*lhs, next_productions);
        }

        debug!(
            "Eliminated ε-productions: {} → {} alternatives",
            self.production_count(),
            grammar.production_count()
        );

        Ok(EpsilonElimination { grammar, nullable })
    }
}
