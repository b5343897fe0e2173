
use ir::tac::Instruction;
use ir::IrGenerator;
use parser::language::Language;
use parser::lexer::tokenize;
use parser::semantic::SemanticAnalyzer;
use parser::{SymbolTable, SyntaxAnalyzer};

// Runs the front end with the IR generator and the semantic analyzer attached.
pub fn lower(source: &str) -> Vec<Instruction> {
    let language = Language::builtin().unwrap();
    let tokens = tokenize(source, &language.registry).unwrap();

    let mut symbols = SymbolTable::new();
    symbols.prepopulate(&tokens);
    let mut analyzer = SemanticAnalyzer::new();
    let mut generator = IrGenerator::new();

    {
        let mut parser = SyntaxAnalyzer::new(&language.table, &mut symbols);
        parser.load_tokens(tokens);
        parser.register_observer(&mut analyzer);
        parser.register_observer(&mut generator);
        parser.run().unwrap();
    }

    assert!(analyzer.errors().is_empty(), "semantic errors: {:?}", analyzer.errors());
    assert!(generator.errors().is_empty(), "generation errors: {:?}", generator.errors());

    generator.into_instructions()
}
