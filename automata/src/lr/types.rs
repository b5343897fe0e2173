
// Index-based view of the grammar used while building the table.
// Terminal 0 is always the end marker, non-terminal 0 the start symbol.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum SymbolId {
    // Terminal
    T(usize),
    // Non-terminal
    N(usize),
}

pub struct Rule {
   pub head: usize,
   pub expand: Vec<SymbolId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Shift(usize),
    Reduce(usize),
    Accept,
}

// Just stores the action/goto table.
pub type MachineTable = Vec<(Vec<Option<Entry>>, Vec<Option<usize>>)>;
