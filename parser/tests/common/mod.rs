
use parser::collector::ProductionCollector;
use parser::language::Language;
use parser::lexer::tokenize;
use parser::semantic::SemanticAnalyzer;
use parser::{ParseError, SemanticError, SymbolTable, SyntaxAnalyzer};

pub struct Outcome {
    pub symbols: SymbolTable,
    pub productions: Vec<String>,
    pub semantic: Vec<SemanticError>,
    pub result: Result<(), ParseError>,
}

// Scans, prepopulates the symbol table and parses with both analyzers attached.
pub fn analyze(source: &str) -> Outcome {
    let language = Language::builtin().unwrap();
    let tokens = tokenize(source, &language.registry).unwrap();

    let mut symbols = SymbolTable::new();
    symbols.prepopulate(&tokens);
    let mut collector = ProductionCollector::new(language.table.grammar().begin_production().clone());
    let mut analyzer = SemanticAnalyzer::new();

    let result = {
        let mut parser = SyntaxAnalyzer::new(&language.table, &mut symbols);
        parser.load_tokens(tokens);
        parser.register_observer(&mut collector);
        parser.register_observer(&mut analyzer);
        parser.run()
    };

    Outcome {
        symbols,
        productions: collector.dump(),
        semantic: analyzer.errors().to_vec(),
        result,
    }
}
