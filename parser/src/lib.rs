pub mod collector;
pub mod language;
pub mod lexer;
pub mod observer;
pub mod semantic;
pub mod symtab;
pub mod syntax;
pub mod token;

mod error;

pub use error::{LexError, ParseError, SemanticError, SymtabError};
pub use observer::ActionObserver;
pub use symtab::{SourceCodeType, SymbolTable, SymbolTableEntry};
pub use syntax::{StackCell, SyntaxAnalyzer};
pub use token::Token;
