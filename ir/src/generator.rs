
use automata::{GrammarSymbol, Production, State};
use parser::language::{IDENTIFIER, INT_CONST};
use parser::{ActionObserver, SymbolTable, Token};
use tracing::{debug, warn};

use super::error::GenError;
use super::tac::*;

/*
 * The code synthesized for one cell of the symbol stack: the
 * instructions computing it, and where its value ends up.
 */
#[derive(Debug, Default)]
struct Fragment {
    value: Option<Val>,
    code: Vec<Instruction>,
}

impl Fragment {
    fn of(value: Val) -> Fragment {
        Fragment {value: Some(value), code: Vec::new()}
    }
}

fn binop(name: &str) -> Option<BinOp> {
    match name {
        "+" => Some(BinOp::Add),
        "-" => Some(BinOp::Sub),
        "*" => Some(BinOp::Mul),
        "/" => Some(BinOp::Div),
        _ => None,
    }
}

/*
 * Builds the IR while parsing: every reduction merges the fragments of
 * the body into the fragment of the head, and accepting flattens what
 * is left on the stack into the final instruction list.
 */
#[derive(Default)]
pub struct IrGenerator {
    stack: Vec<Fragment>,
    next_temp: usize,
    ir: Vec<Instruction>,
    errors: Vec<GenError>,
}

impl IrGenerator {
    pub fn new() -> IrGenerator {
        IrGenerator::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.ir
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.ir
    }

    pub fn errors(&self) -> &[GenError] {
        &self.errors
    }

    pub fn dump(&self) -> Vec<String> {
        self.ir.iter().map(|i| i.to_string()).collect()
    }

    fn temp(&mut self) -> Var {
        let t = Var::Temp(self.next_temp);
        self.next_temp += 1;
        t
    }

    fn report(&mut self, error: GenError) {
        warn!(%error, "IR generation error");
        self.errors.push(error);
    }

    fn combine(&mut self, production: &Production, children: Vec<Fragment>) -> Fragment {
        let body = production.body_names();
        let values = children.iter().map(|c| c.value.clone()).collect::<Vec<_>>();
        let mut code = children.into_iter().flat_map(|c| c.code).collect::<Vec<_>>();

        let value = match (production.head().name(), body.as_slice(), values.as_slice()) {
            ("S", ["id", "=", _], [Some(Val::Var(dest)), _, src])
            | ("S", ["D", "id", "=", _], [_, Some(Val::Var(dest)), _, src]) => {
                match src {
                    Some(src) => code.push(Instruction::Mov(dest.clone(), src.clone())),
                    None => self.report(GenError::MissingValue(production.to_string())),
                }
                None
            },
            ("S", ["return", _], [_, value]) => {
                match value {
                    Some(value) => code.push(Instruction::Ret(value.clone())),
                    None => self.report(GenError::MissingValue(production.to_string())),
                }
                None
            },
            (_, ["(", _, ")"], [_, value, _]) => value.clone(),
            (_, [_, op, _], [Some(a), _, Some(b)]) if binop(op).is_some() => {
                let dest = self.temp();
                if let Some(op) = binop(op) {
                    code.push(Instruction::Bin(dest.clone(), op, a.clone(), b.clone()));
                }
                Some(Val::Var(dest))
            },
            (_, [_], [value]) => value.clone(),
            _ => None,
        };

        Fragment {value, code}
    }
}

impl ActionObserver for IrGenerator {
    fn on_shift(&mut self, _state: State, token: &Token, _symbols: &mut SymbolTable) {
        let fragment = match (token.kind().name(), token.text()) {
            (IDENTIFIER, Some(name)) => Fragment::of(Val::Var(Var::Named(name.to_string()))),
            (INT_CONST, Some(digits)) => match digits.parse::<i64>() {
                Ok(i) => Fragment::of(Val::Imm(i)),
                Err(_) => {
                    self.report(GenError::InvalidConstant(digits.to_string()));
                    Fragment::default()
                },
            },
            _ => Fragment::default(),
        };
        self.stack.push(fragment);
    }

    fn on_reduce(&mut self, _state: State, production: &Production, _symbols: &mut SymbolTable) {
        let n = production.body().len();
        let children = self.stack.split_off(self.stack.len().saturating_sub(n));
        let fragment = self.combine(production, children);
        self.stack.push(fragment);
    }

    fn on_accept(&mut self, _state: State, _symbols: &mut SymbolTable) {
        self.ir = self.stack.drain(..).flat_map(|f| f.code).collect();
        debug!(instructions = self.ir.len(), "generated the IR");
    }
}
