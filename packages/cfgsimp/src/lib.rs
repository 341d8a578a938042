//! ε-production elimination for context-free grammars over single-character
//! symbols.
//!
//! ```
//! use cfgsimp::loader::parse_grammar;
//!
//! let grammar = parse_grammar("S → aA | b\nA → a | ε").unwrap();
//! let result = grammar.eliminate_epsilon_productions().unwrap();
//!
//! assert_eq!(result.grammar.to_string(), "S → aA | a | b\nA → a\n");
//! ```

pub mod error;
pub mod grammars;
pub mod language;
pub mod loader;
pub mod storage;

pub use error::{GrammarError, LoadError, ValidationError};
pub use grammars::{
    Alternative, ContextFreeGrammar, EpsilonElimination, NonTerminal, ProductionSymbol,
    SimplificationStatistics, Terminal,
};
