
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt::Write;

use tracing::debug;

use super::error::AsmError;
use super::tac::*;

const REGISTERS: [&str; 7] = ["t0", "t1", "t2", "t3", "t4", "t5", "t6"];

fn fits_imm12(i: i64) -> bool {
    -2048 <= i && i < 2048
}

// `li` only loads what fits in a 32-bit register.
fn load_imm(i: i64, inst: &Instruction) -> Result<i32, AsmError> {
    i32::try_from(i).map_err(|_| AsmError::ImmediateOutOfRange(inst.to_string()))
}

/*
 * Rewrites the program so that every instruction maps to one RV32IM
 * instruction: constant operations are folded, an immediate is only
 * kept as the right operand of an addition or subtraction (when it
 * fits in 12 bits), and everything after the first RET is dropped.
 */
fn preprocess(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut next_temp = instructions.iter()
        .filter_map(|inst| match inst.dest() {
            Some(Var::Temp(i)) => Some(i + 1),
            _ => None,
        })
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    let mut materialize = |val: Val, out: &mut Vec<Instruction>| -> Val {
        let t = Var::Temp(next_temp);
        next_temp += 1;
        out.push(Instruction::Mov(t.clone(), val));
        Val::Var(t)
    };

    for inst in instructions {
        match inst {
            Instruction::Bin(dest, op, lhs, rhs) => {
                if let (Val::Imm(a), Val::Imm(b)) = (lhs, rhs) {
                    if let Some(res) = op.apply(*a, *b) {
                        out.push(Instruction::Mov(dest.clone(), Val::Imm(res)));
                        continue
                    }
                }

                let (mut lhs, mut rhs) = (lhs.clone(), rhs.clone());
                if let (BinOp::Add, Val::Imm(_), Val::Var(_)) = (op, &lhs, &rhs) {
                    std::mem::swap(&mut lhs, &mut rhs);
                }

                if let Val::Imm(_) = lhs {
                    lhs = materialize(lhs, &mut out);
                }

                let keep_imm = match (op, &rhs) {
                    (BinOp::Add, Val::Imm(b)) => fits_imm12(*b),
                    (BinOp::Sub, Val::Imm(b)) => b.checked_neg().map_or(false, fits_imm12),
                    _ => false,
                };
                if let (Val::Imm(_), false) = (&rhs, keep_imm) {
                    rhs = materialize(rhs, &mut out);
                }

                out.push(Instruction::Bin(dest.clone(), *op, lhs, rhs));
            },
            Instruction::Ret(_) => {
                out.push(inst.clone());
                break
            },
            Instruction::Mov(_, _) => out.push(inst.clone()),
        }
    }

    out
}

/*
 * Keeps one register per live variable. A variable gives its register
 * back after its last use, so a destination may reuse the register of
 * one of the operands of the same instruction.
 */
struct RegisterAllocator {
    regs: [Option<Var>; 7],
    map: HashMap<Var, usize>,
    last_use: HashMap<Var, usize>,
}

impl RegisterAllocator {
    fn new(instructions: &[Instruction]) -> Self {
        let mut last_use = HashMap::new();
        instructions.iter().enumerate().for_each(|(i, inst)| {
            inst.dest().into_iter()
                .chain(inst.operands().into_iter().filter_map(Val::as_var))
                .for_each(|v| {last_use.insert(v.clone(), i);});
        });

        RegisterAllocator {
            regs: Default::default(),
            map: HashMap::new(),
            last_use,
        }
    }

    fn read(&self, var: &Var) -> Result<&'static str, AsmError> {
        self.map.get(var)
            .map(|r| REGISTERS[*r])
            .ok_or_else(|| AsmError::Unassigned(var.clone()))
    }

    fn write(&mut self, var: &Var, at: usize, inst: &Instruction) -> Result<&'static str, AsmError> {
        if let Some(r) = self.map.get(var) {
            return Ok(REGISTERS[*r])
        }

        let last_use = &self.last_use;
        let r = self.regs.iter()
            .position(|held| match held {
                Some(v) => last_use.get(v).map_or(true, |last| *last <= at),
                None => true,
            })
            .ok_or_else(|| AsmError::OutOfRegisters(inst.to_string()))?;

        if let Some(old) = self.regs[r].take() {
            self.map.remove(&old);
        }
        self.regs[r] = Some(var.clone());
        self.map.insert(var.clone(), r);

        Ok(REGISTERS[r])
    }
}

fn inst_to_asm(
    asm: &mut String,
    alloc: &mut RegisterAllocator,
    at: usize,
    inst: &Instruction
) -> Result<(), AsmError> {
    let line = match inst {
        Instruction::Mov(dest, Val::Imm(i)) => {
            let i = load_imm(*i, inst)?;
            let rd = alloc.write(dest, at, inst)?;
            format!("li {}, {}", rd, i)
        },
        Instruction::Mov(dest, Val::Var(src)) => {
            let rs = alloc.read(src)?;
            let rd = alloc.write(dest, at, inst)?;
            format!("mv {}, {}", rd, rs)
        },
        Instruction::Bin(dest, op, a, b) => {
            let rs1 = match a {
                Val::Var(a) => alloc.read(a)?,
                Val::Imm(_) => return Err(AsmError::Unassigned(dest.clone())),
            };

            match b {
                Val::Var(b) => {
                    let rs2 = alloc.read(b)?;
                    let rd = alloc.write(dest, at, inst)?;
                    let mnemonic = match op {
                        BinOp::Add => "add",
                        BinOp::Sub => "sub",
                        BinOp::Mul => "mul",
                        BinOp::Div => "div",
                    };
                    format!("{} {}, {}, {}", mnemonic, rd, rs1, rs2)
                },
                Val::Imm(i) => {
                    let rd = alloc.write(dest, at, inst)?;
                    let imm = if *op == BinOp::Sub {-i} else {*i};
                    format!("addi {}, {}, {}", rd, rs1, imm)
                },
            }
        },
        Instruction::Ret(Val::Imm(i)) => format!("li a0, {}", load_imm(*i, inst)?),
        Instruction::Ret(Val::Var(v)) => format!("mv a0, {}", alloc.read(v)?),
    };

    writeln!(asm, "\t{}\t\t#  {}", line, inst)?;

    Ok(())
}

pub fn ir_to_asm(instructions: &[Instruction]) -> Result<String, AsmError> {
    let program = preprocess(instructions);
    let mut alloc = RegisterAllocator::new(&program);
    let mut asm = String::new();

    writeln!(asm, ".text")?;
    program.iter().enumerate()
        .try_for_each(|(at, inst)| inst_to_asm(&mut asm, &mut alloc, at, inst))?;
    debug!(instructions = program.len(), "generated the assembly");

    Ok(asm)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn named(name: &str) -> Var {
        Var::Named(name.to_string())
    }

    fn var(name: &str) -> Val {
        Val::Var(named(name))
    }

    #[test]
    fn immediates_are_normalized() {
        let program = vec![
            Instruction::Bin(named("a"), BinOp::Add, Val::Imm(2), Val::Imm(3)),
            Instruction::Bin(named("b"), BinOp::Add, Val::Imm(1), var("a")),
            Instruction::Bin(named("c"), BinOp::Sub, Val::Imm(10), var("b")),
            Instruction::Bin(named("d"), BinOp::Mul, var("c"), Val::Imm(4)),
            Instruction::Bin(named("e"), BinOp::Add, var("d"), Val::Imm(5000)),
            Instruction::Ret(var("e")),
            Instruction::Ret(Val::Imm(0)),
        ];

        let lines = preprocess(&program).iter().map(|i| i.to_string()).collect::<Vec<_>>();
        assert_eq!(lines, vec![
            "(MOV, a, 5)",
            "(ADD, b, a, 1)",
            "(MOV, $0, 10)",
            "(SUB, c, $0, b)",
            "(MOV, $1, 4)",
            "(MUL, d, c, $1)",
            "(MOV, $2, 5000)",
            "(ADD, e, d, $2)",
            "(RET, e)",
        ]);
    }

    #[test]
    fn emits_riscv_with_comments() {
        let program = vec![
            Instruction::Mov(named("a"), Val::Imm(8)),
            Instruction::Bin(Var::Temp(0), BinOp::Sub, var("a"), Val::Imm(3)),
            Instruction::Bin(Var::Temp(1), BinOp::Mul, Val::Var(Var::Temp(0)), var("a")),
            Instruction::Ret(Val::Var(Var::Temp(1))),
        ];

        let asm = ir_to_asm(&program).unwrap();
        assert_eq!(asm, [
            ".text",
            "\tli t0, 8\t\t#  (MOV, a, 8)",
            "\taddi t1, t0, -3\t\t#  (SUB, $0, a, 3)",
            "\tmul t0, t1, t0\t\t#  (MUL, $1, $0, a)",
            "\tmv a0, t0\t\t#  (RET, $1)",
            "",
        ].join("\n"));
    }

    #[test]
    fn registers_run_out_when_everything_stays_live() {
        let mut program = (0..8)
            .map(|i| Instruction::Mov(Var::Temp(i), Val::Imm(i as i64)))
            .collect::<Vec<_>>();
        program.extend((1..8).map(|i| {
            let acc = if i == 1 {Var::Temp(0)} else {Var::Temp(100 + i - 1)};
            Instruction::Bin(Var::Temp(100 + i), BinOp::Add, Val::Var(acc), Val::Var(Var::Temp(i)))
        }));
        program.push(Instruction::Ret(Val::Var(Var::Temp(107))));

        assert!(matches!(ir_to_asm(&program), Err(AsmError::OutOfRegisters(_))));

        // Summing as soon as possible keeps only two values alive.
        let program = vec![
            Instruction::Mov(Var::Temp(0), Val::Imm(1)),
            Instruction::Mov(Var::Temp(1), Val::Imm(2)),
            Instruction::Bin(Var::Temp(2), BinOp::Mul, Val::Var(Var::Temp(0)), Val::Var(Var::Temp(1))),
            Instruction::Mov(Var::Temp(3), Val::Imm(3)),
            Instruction::Bin(Var::Temp(4), BinOp::Mul, Val::Var(Var::Temp(2)), Val::Var(Var::Temp(3))),
            Instruction::Ret(Val::Var(Var::Temp(4))),
        ];
        assert!(ir_to_asm(&program).is_ok());
    }

    #[test]
    fn reading_an_unassigned_variable_fails() {
        let program = vec![Instruction::Ret(var("x"))];
        assert!(matches!(ir_to_asm(&program), Err(AsmError::Unassigned(_))));
    }

    #[test]
    fn immediates_must_fit_in_32_bits() {
        let folded = vec![
            Instruction::Bin(Var::Temp(0), BinOp::Mul, Val::Imm(100000), Val::Imm(100000)),
            Instruction::Ret(Val::Var(Var::Temp(0))),
        ];
        assert!(matches!(ir_to_asm(&folded), Err(AsmError::ImmediateOutOfRange(_))));

        let returned = vec![Instruction::Ret(Val::Imm(1 << 40))];
        assert!(matches!(ir_to_asm(&returned), Err(AsmError::ImmediateOutOfRange(_))));

        let widest = vec![
            Instruction::Mov(named("a"), Val::Imm(i32::MIN as i64)),
            Instruction::Ret(var("a")),
        ];
        assert!(ir_to_asm(&widest).unwrap().contains("li t0, -2147483648"));
    }
}
