
mod common;

use pretty_assertions::assert_eq;

use ir::{ir_to_asm, AsmError, Emulator, EmulatorError};

use common::lower;

#[test]
fn programs_compute_what_they_return() {
    let cases = [
        ("int a = 8; return a;", 8),
        ("int a = 8; int b = a * 5 / 3; return b;", 13),
        ("return 10 - 4 - 3;", 3),
        ("return 2 + 3 * 4;", 14),
        ("return (2 + 3) * 4;", 20),
        ("int x = 7; x = x - 10; return x * x;", 9),
    ];

    for (source, expected) in cases.iter() {
        let program = lower(source);
        assert_eq!(Emulator::load(&program).execute(), Ok(Some(*expected)), "{}", source);
    }
}

#[test]
fn the_first_return_wins() {
    let program = lower("return 1; return 2;");
    assert_eq!(Emulator::load(&program).execute(), Ok(Some(1)));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let program = lower("int z = 0; return 1 / z;");
    assert!(matches!(Emulator::load(&program).execute(), Err(EmulatorError::DivisionByZero(_))));
}

#[test]
fn assembly_returns_through_a0() {
    let program = lower("int a = 8; int b; b = a + 3; return b * 2;");
    let asm = ir_to_asm(&program).unwrap();
    let lines = asm.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], ".text");
    assert_eq!(lines[1], "\tli t0, 8\t\t#  (MOV, a, 8)");
    assert!(lines.last().unwrap().starts_with("\tmv a0, "));
    assert!(lines[1..].iter().all(|l| l.contains("\t\t#  (")));
}

#[test]
fn deep_expressions_run_out_of_registers() {
    // Every parenthesized factor stays live until the final product.
    let source = "int a = 1; return (a + 1) * ((a + 2) * ((a + 3) * ((a + 4) * ((a + 5) * ((a + 6) * ((a + 7) * (a + 8)))))));";
    let program = lower(source);

    assert_eq!(Emulator::load(&program).execute(), Ok(Some(362880)));
    assert!(matches!(ir_to_asm(&program), Err(AsmError::OutOfRegisters(_))));
}
