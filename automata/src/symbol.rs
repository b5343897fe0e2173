
use std::fmt;
use std::hash::{Hash, Hasher};

/// Name of the reserved terminal that marks the end of the input.
pub const EOF_NAME: &str = "$";

/// Anything that can appear in a production: identity is the name.
pub trait GrammarSymbol {
    fn name(&self) -> &str;
}

/*
 * A terminal also carries the numeric code it was registered with,
 * but two terminals are the same symbol as soon as their names match.
 */
#[derive(Clone, Debug)]
pub struct Terminal {
    name: String,
    code: i32,
}

impl Terminal {
    pub(crate) fn new(name: &str, code: i32) -> Terminal {
        Terminal {name: name.to_string(), code}
    }

    /// The end marker. Available whether or not a registry was loaded.
    pub fn eof() -> Terminal {
        Terminal::new(EOF_NAME, -1)
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn is_eof(&self) -> bool {
        self.name == EOF_NAME
    }
}

impl GrammarSymbol for Terminal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Terminal) -> bool {
        self.name == other.name
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal {
    name: String,
}

impl NonTerminal {
    pub fn new(name: &str) -> NonTerminal {
        NonTerminal {name: name.to_string()}
    }
}

impl GrammarSymbol for NonTerminal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// A terminal and a non-terminal spelled the same are still distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl GrammarSymbol for Symbol {
    fn name(&self) -> &str {
        match self {
            Symbol::Terminal(t) => t.name(),
            Symbol::NonTerminal(n) => n.name(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Symbol {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(n: NonTerminal) -> Symbol {
        Symbol::NonTerminal(n)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn terminals_compare_by_name_only() {
        assert_eq!(Terminal::new("id", 51), Terminal::new("id", 7));
        assert_ne!(Terminal::new("id", 51), Terminal::new("int", 51));

        let set: HashSet<Terminal> = vec![Terminal::new("id", 51), Terminal::new("id", 7)]
            .into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn variants_with_the_same_spelling_are_distinct() {
        let t: Symbol = Terminal::new("E", 1).into();
        let n: Symbol = NonTerminal::new("E").into();
        assert_eq!(t.name(), n.name());
        assert_ne!(t, n);
    }

    #[test]
    fn eof_is_the_dollar_terminal() {
        let eof = Terminal::eof();
        assert!(eof.is_eof());
        assert_eq!(eof.name(), "$");
        assert_eq!(eof.code(), -1);
    }
}
