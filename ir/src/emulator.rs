
use std::collections::HashMap;

use tracing::trace;

use super::error::EmulatorError;
use super::tac::*;

/// Runs an instruction list and returns what it returns.
pub struct Emulator<'a> {
    instructions: &'a [Instruction],
    env: HashMap<Var, i64>,
}

impl<'a> Emulator<'a> {
    pub fn load(instructions: &'a [Instruction]) -> Emulator<'a> {
        Emulator {instructions, env: HashMap::new()}
    }

    fn get(&self, val: &Val) -> Result<i64, EmulatorError> {
        match val {
            Val::Imm(i) => Ok(*i),
            Val::Var(v) => self.env.get(v).copied().ok_or_else(|| EmulatorError::Unassigned(v.clone())),
        }
    }

    /// `None` when the program never reaches a `RET`.
    pub fn execute(mut self) -> Result<Option<i64>, EmulatorError> {
        for inst in self.instructions {
            trace!(%inst, "emulate");

            match inst {
                Instruction::Mov(dest, a) => {
                    let a = self.get(a)?;
                    self.env.insert(dest.clone(), a);
                },
                Instruction::Bin(dest, op, a, b) => {
                    let (a, b) = (self.get(a)?, self.get(b)?);
                    let res = match op.apply(a, b) {
                        Some(res) => res,
                        None if *op == BinOp::Div && b == 0 => {
                            return Err(EmulatorError::DivisionByZero(inst.to_string()))
                        },
                        None => return Err(EmulatorError::Overflow(inst.to_string())),
                    };
                    self.env.insert(dest.clone(), res);
                },
                Instruction::Ret(a) => return self.get(a).map(Some),
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Var {
        Var::Named(name.to_string())
    }

    #[test]
    fn returns_the_computed_value() {
        let program = vec![
            Instruction::Mov(named("a"), Val::Imm(8)),
            Instruction::Bin(Var::Temp(0), BinOp::Mul, Val::Var(named("a")), Val::Imm(5)),
            Instruction::Bin(Var::Temp(1), BinOp::Div, Val::Var(Var::Temp(0)), Val::Imm(3)),
            Instruction::Ret(Val::Var(Var::Temp(1))),
            Instruction::Ret(Val::Imm(0)),
        ];

        assert_eq!(Emulator::load(&program).execute(), Ok(Some(13)));
    }

    #[test]
    fn no_return_means_no_value() {
        let program = vec![Instruction::Mov(named("a"), Val::Imm(1))];
        assert_eq!(Emulator::load(&program).execute(), Ok(None));
    }

    #[test]
    fn runtime_errors() {
        let unassigned = vec![Instruction::Ret(Val::Var(named("x")))];
        assert_eq!(Emulator::load(&unassigned).execute(), Err(EmulatorError::Unassigned(named("x"))));

        let by_zero = vec![Instruction::Bin(Var::Temp(0), BinOp::Div, Val::Imm(1), Val::Imm(0))];
        assert!(matches!(Emulator::load(&by_zero).execute(), Err(EmulatorError::DivisionByZero(_))));

        let overflow = vec![Instruction::Bin(Var::Temp(0), BinOp::Add, Val::Imm(i64::MAX), Val::Imm(1))];
        assert!(matches!(Emulator::load(&overflow).execute(), Err(EmulatorError::Overflow(_))));
    }
}
