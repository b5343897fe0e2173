
use std::collections::HashSet;
use std::fmt;

use super::error::GrammarError;
use super::registry::TerminalRegistry;
use super::symbol::*;

/// A rewrite rule `head -> body`. The body may be empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production {
    head: NonTerminal,
    body: Vec<Symbol>,
}

impl Production {
    pub fn new(head: NonTerminal, body: Vec<Symbol>) -> Production {
        Production {head, body}
    }

    pub fn head(&self) -> &NonTerminal {
        &self.head
    }

    pub fn body(&self) -> &[Symbol] {
        &self.body
    }

    /// The names of the body symbols, handy to match on a production's shape.
    pub fn body_names(&self) -> Vec<&str> {
        self.body.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        self.body.iter().try_for_each(|s| write!(f, " {}", s))
    }
}

/*
 * An ordered list of productions. The first one is the begin production:
 * its head is the start symbol, which heads nothing else and never
 * appears in a body.
 */
#[derive(Clone, Debug)]
pub struct Grammar {
    productions: Vec<Production>,
    terminals: Vec<Terminal>,
    non_terminals: Vec<NonTerminal>,
}

impl Grammar {
    pub fn new(productions: Vec<Production>) -> Result<Grammar, GrammarError> {
        let start = match productions.first() {
            Some(p) => p.head().clone(),
            None => return Err(GrammarError::Empty),
        };

        let start_reused = productions.iter().skip(1).any(|p| {
            *p.head() == start || p.body().iter().any(|s| *s == Symbol::NonTerminal(start.clone()))
        }) || productions[0].body().contains(&Symbol::NonTerminal(start.clone()));
        if start_reused {
            return Err(GrammarError::InvalidStart(start.to_string()))
        }

        let mut terminals = Vec::new();
        let mut non_terminals = Vec::new();
        for (index, p) in productions.iter().enumerate() {
            if !non_terminals.contains(p.head()) {
                non_terminals.push(p.head().clone());
            }
            for s in p.body() {
                match s {
                    Symbol::Terminal(t) if t.is_eof() => return Err(GrammarError::Malformed {
                        index,
                        reason: "the end marker can not appear in a body".to_string(),
                    }),
                    Symbol::Terminal(t) => if !terminals.contains(t) {
                        terminals.push(t.clone())
                    },
                    Symbol::NonTerminal(_) => (),
                }
            }
        }

        for (index, p) in productions.iter().enumerate() {
            for s in p.body() {
                if let Symbol::NonTerminal(n) = s {
                    if !non_terminals.contains(n) {
                        return Err(GrammarError::Malformed {
                            index,
                            reason: format!("non-terminal \"{}\" has no production", n),
                        })
                    }
                }
            }
        }

        Ok(Grammar {productions, terminals, non_terminals})
    }

    /*
     * Reads a grammar description: productions are separated by `;`,
     * and written `Head -> a b c`. Heads are the non-terminals, every other
     * name must be a registered terminal.
     */
    pub fn parse(text: &str, registry: &TerminalRegistry) -> Result<Grammar, GrammarError> {
        let statements = text.split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(index, s)| {
                let mut sides = s.splitn(2, "->");
                let head = sides.next().map(str::trim).unwrap_or("");
                let body = sides.next().ok_or_else(|| GrammarError::Malformed {
                    index,
                    reason: format!("missing `->` in \"{}\"", s),
                })?;

                if head.is_empty() || head.split_whitespace().count() != 1 {
                    return Err(GrammarError::Malformed {
                        index,
                        reason: format!("invalid head \"{}\"", head),
                    })
                }

                Ok((head, body.split_whitespace().collect::<Vec<_>>()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let heads = statements.iter().map(|(h, _)| *h).collect::<HashSet<_>>();

        let productions = statements.into_iter().map(|(head, body)| {
            let body = body.into_iter().map(|name| {
                if heads.contains(name) {
                    Ok(Symbol::NonTerminal(NonTerminal::new(name)))
                } else {
                    Ok(Symbol::Terminal(registry.resolve(name)?))
                }
            }).collect::<Result<Vec<_>, GrammarError>>()?;

            Ok(Production::new(NonTerminal::new(head), body))
        }).collect::<Result<Vec<_>, GrammarError>>()?;

        Grammar::new(productions)
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn begin_production(&self) -> &Production {
        &self.productions[0]
    }

    pub fn start(&self) -> &NonTerminal {
        self.begin_production().head()
    }

    /// Terminals used in the productions, in order of first appearance.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Non-terminals, in order of their first production.
    pub fn non_terminals(&self) -> &[NonTerminal] {
        &self.non_terminals
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RegistryError;

    fn registry() -> TerminalRegistry {
        let mut registry = TerminalRegistry::new();
        registry.register_all("1 int\n3 =\n5 Semicolon\n6 +\n51 id\n52 IntConst").unwrap();
        registry
    }

    #[test]
    fn parses_productions_in_order() {
        let grammar = Grammar::parse(
            "P -> S_list;\n S_list -> S Semicolon S_list;\n S_list -> ;\n S -> int id = E;\n E -> E + IntConst;\n E -> IntConst;",
            &registry(),
        ).unwrap();

        let lines = grammar.productions().iter().map(|p| p.to_string()).collect::<Vec<_>>();
        assert_eq!(lines, vec![
            "P -> S_list",
            "S_list -> S Semicolon S_list",
            "S_list ->",
            "S -> int id = E",
            "E -> E + IntConst",
            "E -> IntConst",
        ]);
        assert_eq!(grammar.start(), &NonTerminal::new("P"));
        assert_eq!(
            grammar.terminals().iter().map(|t| t.name()).collect::<Vec<_>>(),
            vec!["Semicolon", "int", "id", "=", "+", "IntConst"]
        );
        assert_eq!(grammar.productions()[2].body().len(), 0);
        assert_eq!(grammar.productions()[3].body_names(), vec!["int", "id", "=", "E"]);
    }

    #[test]
    fn unknown_terminal_is_unregistered() {
        let err = Grammar::parse("P -> S; S -> while;", &registry()).unwrap_err();
        assert_eq!(err, GrammarError::Registry(RegistryError::UnregisteredSymbol("while".to_string())));
    }

    #[test]
    fn start_symbol_must_not_be_reused() {
        let err = Grammar::parse("P -> S; S -> P id; S -> id;", &registry()).unwrap_err();
        assert_eq!(err, GrammarError::InvalidStart("P".to_string()));

        let err = Grammar::parse("P -> S; P -> id; S -> id;", &registry()).unwrap_err();
        assert_eq!(err, GrammarError::InvalidStart("P".to_string()));
    }

    #[test]
    fn malformed_statements_are_rejected() {
        assert!(matches!(
            Grammar::parse("P -> S; S id;", &registry()),
            Err(GrammarError::Malformed {index: 1, ..})
        ));
        assert!(matches!(
            Grammar::parse("P Q -> S; S -> id;", &registry()),
            Err(GrammarError::Malformed {index: 0, ..})
        ));
        assert!(matches!(
            Grammar::parse("P -> S $; S -> id;", &registry()),
            Err(GrammarError::Malformed {index: 0, ..})
        ));
        assert_eq!(Grammar::parse("  ", &registry()).unwrap_err(), GrammarError::Empty);
    }
}
