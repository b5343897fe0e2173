
use std::io;
use std::path::PathBuf;

use automata::GrammarError;
use ir::{AsmError, EmulatorError, GenError};
use parser::{LexError, ParseError, SemanticError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {path: PathBuf, source: io::Error},
    #[error("cannot write {}: {source}", .path.display())]
    Write {path: PathBuf, source: io::Error},
    #[error("invalid language definition: {0}")]
    Grammar(#[from] GrammarError),
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("semantic analysis found {} error(s)", .0.len())]
    Semantic(Vec<SemanticError>),
    #[error("IR generation error: {0}")]
    Gen(#[from] GenError),
    #[error("runtime error: {0}")]
    Emulator(#[from] EmulatorError),
    #[error("assembly error: {0}")]
    Asm(#[from] AsmError),
}
