
use super::types::*;

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Var::Named(name) => write!(f, "{}", name),
            Var::Temp(i) => write!(f, "${}", i),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Val::Var(v) => write!(f, "{}", v),
            Val::Imm(i) => write!(f, "{}", i),
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = self;

        macro_rules! cases {
            ($(($variant:ident, $symbol:expr)),*) => {
                match op {
                    $(BinOp::$variant => write!(f, "{}", $symbol),)*
                }
            };
        }

        cases!(
            (Add, "ADD"),
            (Sub, "SUB"),
            (Mul, "MUL"),
            (Div, "DIV")
        )
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Mov(dest, v) => write!(f, "(MOV, {}, {})", dest, v),
            Instruction::Bin(dest, op, a, b) => write!(f, "({}, {}, {}, {})", op, dest, a, b),
            Instruction::Ret(v) => write!(f, "(RET, {})", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_print_as_tuples() {
        let a = Var::Named("a".to_string());
        let t = Var::Temp(3);

        assert_eq!(Instruction::Mov(a.clone(), Val::Imm(8)).to_string(), "(MOV, a, 8)");
        assert_eq!(
            Instruction::Bin(t.clone(), BinOp::Sub, Val::Var(a), Val::Imm(-2)).to_string(),
            "(SUB, $3, a, -2)"
        );
        assert_eq!(Instruction::Ret(Val::Var(t)).to_string(), "(RET, $3)");
    }
}
