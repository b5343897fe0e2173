
use std::collections::hash_map::{Entry, HashMap};
use std::fmt;

use automata::GrammarSymbol;

use super::error::SymtabError;
use super::language::IDENTIFIER;
use super::token::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceCodeType {
    Int,
}

impl fmt::Display for SourceCodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceCodeType::Int => write!(f, "Int"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTableEntry {
    text: String,
    ty: Option<SourceCodeType>,
    ordinal: Option<usize>,
}

impl SymbolTableEntry {
    fn new(text: &str) -> SymbolTableEntry {
        SymbolTableEntry {text: text.to_string(), ty: None, ordinal: None}
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ty(&self) -> Option<SourceCodeType> {
        self.ty
    }

    pub fn set_ty(&mut self, ty: SourceCodeType) {
        self.ty = Some(ty)
    }

    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }

    pub fn set_ordinal(&mut self, ordinal: usize) {
        self.ordinal = Some(ordinal)
    }
}

/// Placeholder written in dumps for entries without a type yet.
pub const UNSET_TYPE: &str = "null";

/*
 * Maps identifier spellings to their entries. It is filled from the
 * token stream before parsing, then annotated in place by the
 * observers, and lives as long as the whole compilation run.
 */
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolTableEntry>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {entries: HashMap::new()}
    }

    /// Adds an entry for every identifier not seen yet; existing entries are untouched.
    pub fn prepopulate<'t, I>(&mut self, tokens: I)
        where I: IntoIterator<Item = &'t Token>
    {
        for token in tokens {
            if token.kind().name() != IDENTIFIER {
                continue
            }
            if let Some(text) = token.text() {
                self.entries.entry(text.to_string())
                    .or_insert_with(|| SymbolTableEntry::new(text));
            }
        }
    }

    pub fn has(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    pub fn lookup(&self, text: &str) -> Result<&SymbolTableEntry, SymtabError> {
        self.entries.get(text).ok_or_else(|| SymtabError::UndefinedSymbol(text.to_string()))
    }

    pub fn lookup_mut(&mut self, text: &str) -> Result<&mut SymbolTableEntry, SymtabError> {
        self.entries.get_mut(text).ok_or_else(|| SymtabError::UndefinedSymbol(text.to_string()))
    }

    pub fn insert(&mut self, text: &str) -> Result<&mut SymbolTableEntry, SymtabError> {
        match self.entries.entry(text.to_string()) {
            Entry::Occupied(_) => Err(SymtabError::DuplicateSymbol(text.to_string())),
            Entry::Vacant(v) => Ok(v.insert(SymbolTableEntry::new(text))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(text, type)` pairs sorted by text.
    pub fn dump(&self) -> Vec<(&str, String)> {
        let mut entries = self.entries.values().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.text.cmp(&b.text));

        entries.into_iter().map(|e| {
            let ty = e.ty.map(|t| t.to_string()).unwrap_or_else(|| UNSET_TYPE.to_string());
            (e.text(), ty)
        }).collect()
    }

    pub fn dump_lines(&self) -> Vec<String> {
        self.dump().into_iter().map(|(text, ty)| format!("({}, {})", text, ty)).collect()
    }
}
