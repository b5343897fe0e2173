
use automata::{NonTerminal, RegistryError, State};
use thiserror::Error;

use super::symtab::SourceCodeType;
use super::token::Token;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {line}:{column}")]
    UnexpectedChar {
        ch: char,
        line: usize,
        column: usize,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymtabError {
    #[error("undefined symbol \"{0}\"")]
    UndefinedSymbol(String),
    #[error("duplicate symbol \"{0}\"")]
    DuplicateSymbol(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error in state {state}, unexpected {lookahead}")]
    Syntax {
        state: State,
        lookahead: Token,
    },
    #[error("accept in state {state} while the lookahead is {lookahead}, not the end marker")]
    AcceptWithoutEndMarker {
        state: State,
        lookahead: Token,
    },
    #[error("the input ended in state {state} before it was accepted")]
    UnexpectedEndOfInput {
        state: State,
    },
    #[error("input left after acceptance, starting with {0}")]
    TrailingInput(Token),
    #[error("no goto entry for state {state} and \"{head}\"")]
    MissingGoto {
        state: State,
        head: NonTerminal,
    },
    #[error("cannot reduce \"{production}\", the parse stack is too short")]
    StackUnderflow {
        production: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("variable \"{0}\" is used before its declaration")]
    Undeclared(String),
    #[error("variable \"{0}\" is declared twice")]
    Redeclared(String),
    #[error("type mismatch for \"{name}\": expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: SourceCodeType,
        found: SourceCodeType,
    },
    #[error(transparent)]
    Symtab(#[from] SymtabError),
}
