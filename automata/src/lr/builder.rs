
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::GrammarError;
use super::types::*;
use super::items::*;

pub struct Builder<'a> {
    rules: &'a [Rule],
    term_names: &'a [String],
    nterm_count: usize,
    first: FirstSets,
    // Stores the states that are built, and the transition
    // map for each state.
    states: Vec<(BTreeSet<LR1Item>, BTreeMap<SymbolId, usize>)>,
    ids: BTreeMap<BTreeSet<LR1Item>, usize>,
}

impl<'a> Builder<'a> {
    pub fn new(rules: &'a [Rule], term_names: &'a [String], nterm_count: usize) -> Builder<'a> {
        Builder {
            rules,
            term_names,
            nterm_count,
            first: FirstSets::compute(rules, nterm_count),
            states: Vec::new(),
            ids: BTreeMap::new(),
        }
    }

    /*
     * Returns the symbol after the bullet in the given item
     * (if it exists, None otherwise).
     */
    fn next_symbol(&self, item: &LR1Item) -> Option<&SymbolId> {
        self.rules[item.prod].expand.get(item.pos)
    }

    /*
     * Returns the items that should be added when computing
     * a closure.
     */
    fn neighbors(&self, item: &LR1Item) -> Vec<LR1Item> {
        if let Some(SymbolId::N(id)) = self.next_symbol(item) {
            // id is the id of the non-terminal symbol just after the bullet,
            // the lookaheads come from what follows it.
            let rest = &self.rules[item.prod].expand[item.pos + 1..];
            let lookaheads = self.first.first_of(rest, item.lookahead);

            self.rules.iter().enumerate()
                .filter(|(_, rule)| rule.head == *id)
                .flat_map(|(prod, _)| {
                    lookaheads.iter().map(move |&lookahead| LR1Item {prod, pos: 0, lookahead})
                })
                .collect()
        } else {vec!()}
    }

    fn closure(&self, set: BTreeSet<LR1Item>) -> BTreeSet<LR1Item> {
        let mut set = set;
        let mut pending = set.iter().copied().collect::<Vec<_>>();

        while let Some(item) = pending.pop() {
            for next in self.neighbors(&item) {
                if set.insert(next) {
                    pending.push(next);
                }
            }
        }

        set
    }

    fn advance(&self, id: usize, sym: SymbolId) -> BTreeSet<LR1Item> {
        let moved = self.states[id].0.iter()
            .filter(|item| self.next_symbol(item) == Some(&sym))
            .map(LR1Item::move_bullet)
            .collect();

        self.closure(moved)
    }

    /*
     * Computes the transitions of every state, discovering
     * new states on the way.
     */
    fn build_states(&mut self) {
        let mut root = BTreeSet::new();
        root.insert(LR1Item::root());
        let root = self.closure(root);
        self.ids.insert(root.clone(), 0);
        self.states.push((root, BTreeMap::new()));

        let symbols = (0..self.term_names.len()).map(SymbolId::T)
            .chain((0..self.nterm_count).map(SymbolId::N))
            .collect::<Vec<_>>();

        let mut id = 0;
        while id < self.states.len() {
            for sym in symbols.iter().copied() {
                let state = self.advance(id, sym);
                if state.is_empty() {
                    continue
                }

                let tgt_id = match self.ids.get(&state) {
                    Some(tgt_id) => *tgt_id,
                    None => {
                        let tgt_id = self.states.len();
                        self.ids.insert(state.clone(), tgt_id);
                        self.states.push((state, BTreeMap::new()));
                        tgt_id
                    }
                };
                self.states[id].1.insert(sym, tgt_id);
            }
            id += 1;
        }
    }

    pub fn build(&mut self) -> Result<MachineTable, GrammarError> {
        self.build_states();
        trace!(states = self.states.len(), "built the LR(1) item sets");

        self.states.iter().enumerate().map(|(state, (items, trans))| {
            let mut actions = vec![None; self.term_names.len()];
            let mut goto = vec![None; self.nterm_count];

            // Fill the shifts and gotos
            trans.iter().for_each(|(sym, tgt)| {
                match sym {
                    SymbolId::T(k) => actions[*k] = Some(Entry::Shift(*tgt)),
                    SymbolId::N(k) => goto[*k] = Some(*tgt),
                }
            });

            // Fill the reductions
            for item in items {
                if self.rules[item.prod].expand.len() != item.pos {
                    continue
                }

                // We are at the end of a production. The begin
                // production is never reduced: it accepts.
                let entry = if item.prod == 0 {
                    Entry::Accept
                } else {
                    Entry::Reduce(item.prod)
                };

                match actions[item.lookahead] {
                    None => actions[item.lookahead] = Some(entry),
                    Some(e) if e == entry => (),
                    Some(_) => return Err(GrammarError::Conflict {
                        state,
                        lookahead: self.term_names[item.lookahead].clone(),
                    }),
                }
            }

            Ok((actions, goto))
        }).collect()
    }
}
