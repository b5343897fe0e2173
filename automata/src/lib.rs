pub mod lr;

mod error;
mod grammar;
mod registry;
mod symbol;

pub use error::{GrammarError, RegistryError};
pub use grammar::{Grammar, Production};
pub use lr::{Action, LrTable, ParseTable, State};
pub use registry::TerminalRegistry;
pub use symbol::{GrammarSymbol, NonTerminal, Symbol, Terminal, EOF_NAME};
