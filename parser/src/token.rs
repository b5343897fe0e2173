
use std::fmt;

use automata::{GrammarSymbol, Terminal};

/*
 * A scanned token. Identifiers and integer constants carry their
 * text, fixed-form tokens (keywords, operators, the end marker) don't.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    kind: Terminal,
    text: Option<String>,
}

impl Token {
    pub fn simple(kind: Terminal) -> Token {
        Token {kind, text: None}
    }

    pub fn normal(kind: Terminal, text: &str) -> Token {
        Token {kind, text: Some(text.to_string())}
    }

    pub fn eof() -> Token {
        Token::simple(Terminal::eof())
    }

    pub fn kind(&self) -> &Terminal {
        &self.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.kind.name(), self.text.as_deref().unwrap_or(""))
    }
}
