
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::{GrammarError, Grammar, GrammarSymbol, NonTerminal, Production, Symbol, Terminal};
use super::builder::Builder;
use super::types::*;

/// A row of the action/goto table. Opaque apart from its identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(usize);

impl State {
    pub fn new(id: usize) -> State {
        State(id)
    }

    pub fn id(&self) -> usize {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action<'a> {
    Shift(State),
    Reduce(&'a Production),
    Accept,
    Error,
}

/// What a shift-reduce driver needs from an LR table.
pub trait ParseTable {
    fn initial_state(&self) -> State;

    /// Exactly one action per (state, terminal), `Action::Error` when the pair is unknown.
    fn action(&self, state: State, lookahead: &Terminal) -> Action<'_>;

    fn goto(&self, state: State, head: &NonTerminal) -> Option<State>;
}

/// A canonical LR(1) table built from a `Grammar`.
pub struct LrTable {
    grammar: Grammar,
    terms: Vec<String>,
    term_ids: HashMap<Terminal, usize>,
    nterm_ids: HashMap<NonTerminal, usize>,
    table: MachineTable,
}

impl LrTable {
    pub fn build(grammar: Grammar) -> Result<LrTable, GrammarError> {
        let terminals = std::iter::once(Terminal::eof())
            .chain(grammar.terminals().iter().cloned())
            .collect::<Vec<_>>();

        let term_ids = terminals.iter().enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect::<HashMap<_, _>>();
        let nterm_ids = grammar.non_terminals().iter().enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect::<HashMap<_, _>>();

        // Transform the rules to use the index-based approach
        // (instead of using plain names).
        let rules = grammar.productions().iter().map(|p| {
            let expand = p.body().iter().map(|s| match s {
                Symbol::Terminal(t) => SymbolId::T(term_ids[t]),
                Symbol::NonTerminal(n) => SymbolId::N(nterm_ids[n]),
            }).collect();
            Rule {head: nterm_ids[p.head()], expand}
        }).collect::<Vec<_>>();

        let terms = terminals.iter().map(|t| t.name().to_string()).collect::<Vec<_>>();
        let table = Builder::new(&rules, &terms, nterm_ids.len()).build()?;
        debug!(states = table.len(), productions = rules.len(), "built the LR(1) table");

        Ok(LrTable {grammar, terms, term_ids, nterm_ids, table})
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    /*
     * Renders the table as CSV: a header line, then one line per state
     * with the action columns followed by the goto columns.
     */
    pub fn dump(&self) -> Vec<String> {
        let gotos = &self.grammar.non_terminals()[1..];

        let header = std::iter::once("State".to_string())
            .chain(self.terms.iter().map(|t| csv_cell(t)))
            .chain(gotos.iter().map(|n| csv_cell(n.name())))
            .collect::<Vec<_>>()
            .join(",");

        let rows = self.table.iter().enumerate().map(|(state, (actions, goto))| {
            let actions = actions.iter().map(|a| match a {
                Some(Entry::Shift(q)) => format!("shift {}", q),
                Some(Entry::Reduce(p)) => format!("reduce {}", p),
                Some(Entry::Accept) => "accept".to_string(),
                None => String::new(),
            });
            let goto = goto[1..].iter().map(|q| q.map(|q| q.to_string()).unwrap_or_default());

            std::iter::once(state.to_string())
                .chain(actions)
                .chain(goto)
                .collect::<Vec<_>>()
                .join(",")
        });

        std::iter::once(header).chain(rows).collect()
    }
}

// Symbol names may contain the separator, e.g. the `,` terminal.
fn csv_cell(text: &str) -> String {
    if text.contains(|c: char| c == ',' || c == '"' || c == '\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

impl ParseTable for LrTable {
    fn initial_state(&self) -> State {
        State(0)
    }

    fn action(&self, state: State, lookahead: &Terminal) -> Action<'_> {
        let entry = self.term_ids.get(lookahead)
            .and_then(|k| self.table.get(state.0).and_then(|row| row.0[*k]));

        match entry {
            Some(Entry::Shift(q)) => Action::Shift(State(q)),
            Some(Entry::Reduce(p)) => Action::Reduce(&self.grammar.productions()[p]),
            Some(Entry::Accept) => Action::Accept,
            None => Action::Error,
        }
    }

    fn goto(&self, state: State, head: &NonTerminal) -> Option<State> {
        let k = self.nterm_ids.get(head)?;
        self.table.get(state.0).and_then(|row| row.1[*k]).map(State)
    }
}
