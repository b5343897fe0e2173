
use automata::{GrammarSymbol, Production, State};
use tracing::warn;

use super::error::SemanticError;
use super::language::{IDENTIFIER, INT_CONST};
use super::observer::ActionObserver;
use super::symtab::{SourceCodeType, SymbolTable};
use super::token::Token;

// What the analyzer knows about one cell of the symbol stack.
#[derive(Clone, Debug, Default)]
struct Attr {
    ty: Option<SourceCodeType>,
    ident: Option<String>,
}

impl Attr {
    fn typed(ty: Option<SourceCodeType>) -> Attr {
        Attr {ty, ident: None}
    }
}

// What a type mismatch is reported against: the assigned identifier, or the production.
fn subject(production: &Production, children: &[Attr]) -> String {
    children.iter()
        .find_map(|c| c.ident.clone())
        .unwrap_or_else(|| production.to_string())
}

/*
 * Checks declarations before use and type agreement while parsing.
 * Declaring a variable fills its type and declaration ordinal in the
 * symbol table. Errors are collected and never stop the parser.
 */
#[derive(Default)]
pub struct SemanticAnalyzer {
    stack: Vec<Attr>,
    declared: usize,
    errors: Vec<SemanticError>,
}

impl SemanticAnalyzer {
    pub fn new() -> SemanticAnalyzer {
        SemanticAnalyzer::default()
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    fn report(&mut self, error: SemanticError) {
        warn!(%error, "semantic error");
        self.errors.push(error);
    }

    fn declare(&mut self, ident: &Attr, ty: Option<SourceCodeType>, symbols: &mut SymbolTable) {
        let (name, ty) = match (&ident.ident, ty) {
            (Some(name), Some(ty)) => (name, ty),
            _ => return,
        };

        match symbols.lookup_mut(name) {
            Ok(entry) if entry.ty().is_some() => {
                self.report(SemanticError::Redeclared(name.clone()))
            },
            Ok(entry) => {
                entry.set_ty(ty);
                entry.set_ordinal(self.declared);
                self.declared += 1;
            },
            Err(e) => self.report(e.into()),
        }
    }

    fn type_of(&mut self, ident: &Attr, symbols: &SymbolTable) -> Option<SourceCodeType> {
        let name = ident.ident.as_ref()?;

        match symbols.lookup(name) {
            Ok(entry) => {
                if entry.ty().is_none() {
                    self.report(SemanticError::Undeclared(name.clone()));
                }
                entry.ty()
            },
            Err(e) => {
                self.report(e.into());
                None
            },
        }
    }

    // Unknown types already produced an error, so only known ones are compared.
    fn agree(&mut self, name: &str, expected: Option<SourceCodeType>, found: Option<SourceCodeType>)
        -> Option<SourceCodeType>
    {
        match (expected, found) {
            (Some(expected), Some(found)) if expected != found => {
                self.report(SemanticError::TypeMismatch {name: name.to_string(), expected, found});
                None
            },
            (Some(ty), _) | (None, Some(ty)) => Some(ty),
            (None, None) => None,
        }
    }
}

impl ActionObserver for SemanticAnalyzer {
    fn on_shift(&mut self, _state: State, token: &Token, _symbols: &mut SymbolTable) {
        let attr = match token.kind().name() {
            IDENTIFIER => Attr {ty: None, ident: token.text().map(str::to_string)},
            INT_CONST => Attr::typed(Some(SourceCodeType::Int)),
            _ => Attr::default(),
        };
        self.stack.push(attr);
    }

    fn on_reduce(&mut self, _state: State, production: &Production, symbols: &mut SymbolTable) {
        let n = production.body().len();
        let children = self.stack.split_off(self.stack.len().saturating_sub(n));
        let body = production.body_names();

        let attr = match (production.head().name(), body.as_slice()) {
            ("D", ["int"]) => Attr::typed(Some(SourceCodeType::Int)),
            ("S", ["D", "id"]) => {
                self.declare(&children[1], children[0].ty, symbols);
                Attr::default()
            },
            ("S", ["D", "id", "=", "E"]) => {
                self.declare(&children[1], children[0].ty, symbols);
                self.agree(&subject(production, &children), children[0].ty, children[3].ty);
                Attr::default()
            },
            ("S", ["id", "=", "E"]) => {
                let declared = self.type_of(&children[0], symbols);
                self.agree(&subject(production, &children), declared, children[2].ty);
                Attr::default()
            },
            ("B", ["id"]) => Attr::typed(self.type_of(&children[0], symbols)),
            ("B", ["(", "E", ")"]) => Attr::typed(children[1].ty),
            (_, [_, "+", _]) | (_, [_, "-", _]) | (_, [_, "*", _]) | (_, [_, "/", _]) => {
                Attr::typed(self.agree(&subject(production, &children), children[0].ty, children[2].ty))
            },
            (_, [_]) => Attr::typed(children[0].ty),
            _ => Attr::default(),
        };

        self.stack.push(attr);
    }

    fn on_accept(&mut self, _state: State, _symbols: &mut SymbolTable) {
        self.stack.clear();
    }
}
