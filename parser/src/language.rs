
use automata::{Grammar, GrammarError, LrTable, TerminalRegistry};

/// Kind of the identifier tokens.
pub const IDENTIFIER: &str = "id";
/// Kind of the integer constant tokens.
pub const INT_CONST: &str = "IntConst";
pub const SEMICOLON: &str = "Semicolon";

pub const CODING_MAP: &str = "\
1 int
2 return
3 =
4 ,
5 Semicolon
6 +
7 -
8 *
9 /
10 (
11 )
51 id
52 IntConst
";

pub const GRAMMAR: &str = "\
P -> S_list;
S_list -> S Semicolon S_list;
S_list -> S Semicolon;
S -> D id;
S -> D id = E;
D -> int;
S -> id = E;
S -> return E;
E -> E + A;
E -> E - A;
E -> A;
A -> A * B;
A -> A / B;
A -> B;
B -> ( E );
B -> id;
B -> IntConst;
";

/// The terminals of a language together with the table of its grammar.
pub struct Language {
    pub registry: TerminalRegistry,
    pub table: LrTable,
}

impl Language {
    pub fn load(coding_map: &str, grammar: &str) -> Result<Language, GrammarError> {
        let mut registry = TerminalRegistry::new();
        registry.register_all(coding_map)?;
        let table = LrTable::build(Grammar::parse(grammar, &registry)?)?;

        Ok(Language {registry, table})
    }

    pub fn builtin() -> Result<Language, GrammarError> {
        Language::load(CODING_MAP, GRAMMAR)
    }
}
