
mod common;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use parser::ParseError;

use common::analyze;

#[test]
fn a_small_program_is_accepted() {
    let outcome = analyze("int a = 1;\nint b;\nb = a + 2 * (a - 3);\nreturn b / a;");

    assert_eq!(outcome.result, Ok(()));
    assert!(outcome.semantic.is_empty());
    assert_eq!(outcome.symbols.dump_lines(), vec!["(a, Int)", "(b, Int)"]);
    assert_eq!(outcome.productions.last().map(String::as_str), Some("P -> S_list"));
}

#[test]
fn a_missing_semicolon_is_a_syntax_error() {
    let outcome = analyze("int a = 1");

    match outcome.result {
        Err(ParseError::Syntax {lookahead, ..}) => assert!(lookahead.is_eof()),
        other => panic!("unexpected result {:?}", other),
    }
    // Nothing was accepted, so the begin production is never recorded.
    assert!(outcome.productions.iter().all(|p| p != "P -> S_list"));
}

#[test]
fn the_symbol_table_keeps_unknown_types_as_unset() {
    let outcome = analyze("return x;");

    assert_eq!(outcome.result, Ok(()));
    assert_eq!(outcome.semantic.len(), 1);
    assert_eq!(outcome.symbols.dump_lines(), vec!["(x, null)"]);
}

proptest! {
    #[test]
    fn sums_of_constants_always_parse(values in prop::collection::vec(0u32..1000, 1..20)) {
        let expr = values.iter().map(u32::to_string).collect::<Vec<_>>().join(" + ");
        let outcome = analyze(&format!("int a = {};\nreturn a;", expr));

        prop_assert_eq!(outcome.result, Ok(()));
        prop_assert!(outcome.semantic.is_empty());
    }
}
