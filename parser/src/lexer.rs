
use std::iter::Peekable;

use automata::TerminalRegistry;
use tracing::debug;

use super::error::LexError;
use super::language::{IDENTIFIER, INT_CONST, SEMICOLON};
use super::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Loc {
    line: usize,
    column: usize,
}

struct CountingIter<'a> {
    chars: std::str::Chars<'a>,
    line: usize,
    column: usize,
}

impl<'a> CountingIter<'a> {
    fn new(s: &'a str) -> CountingIter<'a> {
        CountingIter {
            chars: s.chars(),
            line: 1,
            column: 1,
        }
    }
}

impl Iterator for CountingIter<'_> {
    type Item = (char, Loc);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let res = (c, Loc {line: self.line, column: self.column});

        // Prepare the position of the next character.
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(res)
    }
}

fn take_while<P>(chars: &mut Peekable<CountingIter<'_>>, pred: P) -> String
    where P: Fn(char) -> bool
{
    let mut s = String::new();
    while let Some((c, _)) = chars.peek() {
        if !pred(*c) {
            break
        }
        s.push(*c);
        chars.next();
    }
    s
}

fn punctuator(c: char) -> Option<&'static str> {
    match c {
        '=' => Some("="),
        ',' => Some(","),
        ';' => Some(SEMICOLON),
        '+' => Some("+"),
        '-' => Some("-"),
        '*' => Some("*"),
        '/' => Some("/"),
        '(' => Some("("),
        ')' => Some(")"),
        _ => None,
    }
}

/*
 * Splits the source into tokens. Token kinds come from the registry,
 * and the result always ends with exactly one end-of-input token.
 */
pub fn tokenize(source: &str, registry: &TerminalRegistry) -> Result<Vec<Token>, LexError> {
    let mut chars = CountingIter::new(source).peekable();
    let mut tokens = Vec::new();

    while let Some(&(c, loc)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_alphabetic() || c == '_' {
            let word = take_while(&mut chars, |c| c.is_ascii_alphanumeric() || c == '_');
            let token = match word.as_str() {
                "int" | "return" => Token::simple(registry.resolve(&word)?),
                _ => Token::normal(registry.resolve(IDENTIFIER)?, &word),
            };
            tokens.push(token);
        } else if c.is_ascii_digit() {
            let digits = take_while(&mut chars, |c| c.is_ascii_digit());
            tokens.push(Token::normal(registry.resolve(INT_CONST)?, &digits));
        } else if let Some(name) = punctuator(c) {
            chars.next();
            tokens.push(Token::simple(registry.resolve(name)?));
        } else {
            return Err(LexError::UnexpectedChar {ch: c, line: loc.line, column: loc.column})
        }
    }

    tokens.push(Token::eof());
    debug!(count = tokens.len(), "scanned the source");

    Ok(tokens)
}
