
/// A variable of the IR: a source identifier or a generated temporary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    Named(String),
    Temp(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Val {
    Var(Var),
    Imm(i64),
}

impl Val {
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Val::Var(v) => Some(v),
            Val::Imm(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Evaluates the operation, `None` on overflow or division by zero.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div => a.checked_div(b),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Mov(Var, Val),
    Bin(Var, BinOp, Val, Val),
    Ret(Val),
}

impl Instruction {
    pub fn dest(&self) -> Option<&Var> {
        match self {
            Instruction::Mov(dest, _) | Instruction::Bin(dest, _, _, _) => Some(dest),
            Instruction::Ret(_) => None,
        }
    }

    /// The values the instruction reads.
    pub fn operands(&self) -> Vec<&Val> {
        match self {
            Instruction::Mov(_, a) | Instruction::Ret(a) => vec![a],
            Instruction::Bin(_, _, a, b) => vec![a, b],
        }
    }
}
