
use std::collections::BTreeSet;

use super::types::*;

/*
 * FIRST sets of the non-terminals, computed as a fixpoint so that
 * epsilon productions are taken into account.
 */
pub struct FirstSets {
    nullable: Vec<bool>,
    first: Vec<BTreeSet<usize>>,
}

impl FirstSets {
    pub fn compute(rules: &[Rule], nterm_count: usize) -> FirstSets {
        let mut sets = FirstSets {
            nullable: vec![false; nterm_count],
            first: vec![BTreeSet::new(); nterm_count],
        };

        loop {
            let mut changed = false;

            for rule in rules {
                let mut all_nullable = true;

                for sym in &rule.expand {
                    match sym {
                        SymbolId::T(k) => {
                            changed |= sets.first[rule.head].insert(*k);
                            all_nullable = false;
                        },
                        SymbolId::N(k) => {
                            let found = sets.first[*k].clone();
                            for t in found {
                                changed |= sets.first[rule.head].insert(t);
                            }
                            all_nullable = sets.nullable[*k];
                        },
                    }

                    if !all_nullable {
                        break
                    }
                }

                if all_nullable && !sets.nullable[rule.head] {
                    sets.nullable[rule.head] = true;
                    changed = true;
                }
            }

            if !changed {
                break
            }
        }

        sets
    }

    /*
     * FIRST(seq lookahead): the terminals that may start `seq`,
     * plus the lookahead if `seq` can derive epsilon.
     */
    pub fn first_of(&self, seq: &[SymbolId], lookahead: usize) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();

        for sym in seq {
            match sym {
                SymbolId::T(k) => {
                    found.insert(*k);
                    return found
                },
                SymbolId::N(k) => {
                    found.extend(self.first[*k].iter().copied());
                    if !self.nullable[*k] {
                        return found
                    }
                },
            }
        }

        found.insert(lookahead);
        found
    }
}

// A LR(0) item with 1 token lookahead.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct LR1Item {
    pub prod: usize,
    pub pos: usize,
    pub lookahead: usize,
}

impl LR1Item {
    /*
     * The item the start state is the closure of:
     * nothing read yet from the begin production, expecting eof.
     */
    pub fn root() -> LR1Item {
        LR1Item {prod: 0, pos: 0, lookahead: 0}
    }

    /*
     * Moves the bullet to the right.
     */
    pub fn move_bullet(&self) -> LR1Item {
        LR1Item {pos: self.pos + 1, ..*self}
    }
}
