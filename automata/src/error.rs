
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("the terminal registry can not be loaded twice")]
    AlreadyLoaded,
    #[error("malformed coding table, line {line}: {reason}")]
    Malformed {
        line: usize,
        reason: String,
    },
    #[error("unregistered grammar symbol \"{0}\"")]
    UnregisteredSymbol(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("the grammar has no production")]
    Empty,
    #[error("malformed production #{index}: {reason}")]
    Malformed {
        index: usize,
        reason: String,
    },
    #[error("invalid start symbol \"{0}\": it must head only the first production and never appear in a body")]
    InvalidStart(String),
    #[error("conflict in state {state} on lookahead \"{lookahead}\"")]
    Conflict {
        state: usize,
        lookahead: String,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
