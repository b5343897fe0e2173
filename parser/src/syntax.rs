
use std::collections::VecDeque;

use automata::{Action, GrammarSymbol, NonTerminal, ParseTable, Production, State};
use tracing::{debug, trace};

use super::error::ParseError;
use super::observer::ActionObserver;
use super::symtab::SymbolTable;
use super::token::Token;

/// A cell of the symbol stack: a shifted token or a reduced non-terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackCell {
    Token(Token),
    NonTerminal(NonTerminal),
}

impl GrammarSymbol for StackCell {
    fn name(&self) -> &str {
        match self {
            StackCell::Token(t) => t.kind().name(),
            StackCell::NonTerminal(n) => n.name(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Shifted,
    // Carries the length of the reduced body.
    Reduced(usize),
    Accepted,
}

/*
 * The LR driver. It keeps a symbol stack and a state stack of the same
 * height, both starting with a sentinel (the end marker and the initial
 * state), and tells every registered observer, in registration order,
 * about each shift, reduce and accept.
 */
pub struct SyntaxAnalyzer<'a, T: ParseTable> {
    table: &'a T,
    symbols: &'a mut SymbolTable,
    observers: Vec<&'a mut dyn ActionObserver>,
    tokens: VecDeque<Token>,
    symbol_stack: Vec<StackCell>,
    state_stack: Vec<State>,
}

impl<'a, T: ParseTable> SyntaxAnalyzer<'a, T> {
    pub fn new(table: &'a T, symbols: &'a mut SymbolTable) -> SyntaxAnalyzer<'a, T> {
        SyntaxAnalyzer {
            table,
            symbols,
            observers: Vec::new(),
            tokens: VecDeque::new(),
            symbol_stack: vec![StackCell::Token(Token::eof())],
            state_stack: vec![table.initial_state()],
        }
    }

    pub fn register_observer(&mut self, observer: &'a mut dyn ActionObserver) {
        self.observers.push(observer);
    }

    pub fn load_tokens<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        self.tokens = tokens.into_iter().collect();
    }

    /// Height of the stacks, sentinels included.
    pub fn depth(&self) -> usize {
        self.symbol_stack.len()
    }

    fn current_state(&self) -> State {
        // The sentinel state is never popped.
        self.state_stack.last().copied().unwrap_or_else(|| self.table.initial_state())
    }

    /*
     * Performs one action of the automaton. Observers are only told
     * about the step once the stacks are up to date.
     */
    fn step(&mut self) -> Result<Step, ParseError> {
        let state = self.current_state();
        let table = self.table;

        let action = match self.tokens.front() {
            Some(lookahead) => table.action(state, lookahead.kind()),
            None => return Err(ParseError::UnexpectedEndOfInput {state}),
        };

        match action {
            Action::Shift(next) => {
                let token = self.tokens.pop_front()
                    .ok_or(ParseError::UnexpectedEndOfInput {state})?;
                debug!(from = %state, to = %next, token = %token, "shift");

                self.symbol_stack.push(StackCell::Token(token));
                self.state_stack.push(next);

                if let Some(StackCell::Token(token)) = self.symbol_stack.last() {
                    for observer in self.observers.iter_mut() {
                        observer.on_shift(next, token, &mut *self.symbols);
                    }
                }

                Ok(Step::Shifted)
            },
            Action::Reduce(production) => {
                let n = production.body().len();
                if n >= self.state_stack.len() {
                    return Err(ParseError::StackUnderflow {production: production.to_string()})
                }

                let keep = self.state_stack.len() - n;
                self.symbol_stack.truncate(keep);
                self.state_stack.truncate(keep);

                let below = self.current_state();
                let next = table.goto(below, production.head())
                    .ok_or_else(|| ParseError::MissingGoto {state: below, head: production.head().clone()})?;
                debug!(from = %state, to = %next, production = %production, "reduce");

                self.symbol_stack.push(StackCell::NonTerminal(production.head().clone()));
                self.state_stack.push(next);

                self.notify_reduce(next, production);

                Ok(Step::Reduced(n))
            },
            Action::Accept => {
                match self.tokens.pop_front() {
                    Some(token) if token.is_eof() => {
                        debug!(state = %state, "accept");
                        Ok(Step::Accepted)
                    },
                    Some(lookahead) => Err(ParseError::AcceptWithoutEndMarker {state, lookahead}),
                    None => Err(ParseError::UnexpectedEndOfInput {state}),
                }
            },
            Action::Error => {
                let lookahead = self.tokens.front().cloned().unwrap_or_else(Token::eof);
                trace!(state = %state, lookahead = %lookahead, "no action");
                Err(ParseError::Syntax {state, lookahead})
            },
        }
    }

    fn notify_reduce(&mut self, state: State, production: &Production) {
        for observer in self.observers.iter_mut() {
            observer.on_reduce(state, production, &mut *self.symbols);
        }
    }

    /*
     * Runs the automaton over the loaded tokens. Stops at the first
     * error; on success the observers have been told about the
     * acceptance exactly once.
     */
    pub fn run(mut self) -> Result<(), ParseError> {
        let mut accepted = false;

        while !self.tokens.is_empty() {
            if let Step::Accepted = self.step()? {
                accepted = true;
                break
            }
        }

        let state = self.current_state();
        if !accepted {
            return Err(ParseError::UnexpectedEndOfInput {state})
        }
        if let Some(token) = self.tokens.pop_front() {
            return Err(ParseError::TrailingInput(token))
        }

        for observer in self.observers.iter_mut() {
            observer.on_accept(state, &mut *self.symbols);
        }

        Ok(())
    }
}
