
use automata::{Production, State};

use super::symtab::SymbolTable;
use super::token::Token;

/*
 * A pass driven by the parser. Every callback runs after the parser
 * has finished updating its stacks for that event, and receives the
 * symbol table of the run. Callbacks can't fail the parse: an observer
 * keeps its own errors and reports them once parsing is over.
 */
pub trait ActionObserver {
    fn on_shift(&mut self, state: State, token: &Token, symbols: &mut SymbolTable);

    fn on_reduce(&mut self, state: State, production: &Production, symbols: &mut SymbolTable);

    fn on_accept(&mut self, state: State, symbols: &mut SymbolTable);
}
