pub mod context_free;
pub mod epsilon_free;
pub mod types;

pub use context_free::ContextFreeGrammar;
pub use epsilon_free::{EpsilonElimination, SimplificationStatistics};
pub use types::{Alternative, NonTerminal, ProductionSymbol, Terminal};
