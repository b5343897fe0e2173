
use automata::{Production, State};

use super::observer::ActionObserver;
use super::symtab::SymbolTable;
use super::token::Token;

/*
 * Records the production of every reduction. Accepting stands for the
 * reduction of the begin production, which is recorded last.
 */
pub struct ProductionCollector {
    begin: Production,
    reduced: Vec<Production>,
}

impl ProductionCollector {
    pub fn new(begin: Production) -> ProductionCollector {
        ProductionCollector {begin, reduced: Vec::new()}
    }

    pub fn dump(&self) -> Vec<String> {
        self.reduced.iter().map(|p| p.to_string()).collect()
    }
}

impl ActionObserver for ProductionCollector {
    fn on_shift(&mut self, _state: State, _token: &Token, _symbols: &mut SymbolTable) {}

    fn on_reduce(&mut self, _state: State, production: &Production, _symbols: &mut SymbolTable) {
        self.reduced.push(production.clone());
    }

    fn on_accept(&mut self, _state: State, _symbols: &mut SymbolTable) {
        self.reduced.push(self.begin.clone());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::language::Language;
    use crate::lexer::tokenize;
    use crate::syntax::SyntaxAnalyzer;

    #[test]
    fn collects_the_reductions_then_the_begin_production() {
        let language = Language::builtin().unwrap();
        let tokens = tokenize("int a;\na = 2 * 3;\nreturn a;", &language.registry).unwrap();
        let mut symbols = SymbolTable::new();
        let mut collector = ProductionCollector::new(language.table.grammar().begin_production().clone());

        let mut parser = SyntaxAnalyzer::new(&language.table, &mut symbols);
        parser.load_tokens(tokens);
        parser.register_observer(&mut collector);
        parser.run().unwrap();

        assert_eq!(collector.dump(), vec![
            "D -> int",
            "S -> D id",
            "B -> IntConst",
            "A -> B",
            "B -> IntConst",
            "A -> A * B",
            "E -> A",
            "S -> id = E",
            "B -> id",
            "A -> B",
            "E -> A",
            "S -> return E",
            "S_list -> S Semicolon",
            "S_list -> S Semicolon S_list",
            "S_list -> S Semicolon S_list",
            "P -> S_list",
        ]);
    }
}
