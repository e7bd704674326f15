//! Reversal: swap initial and final states and flip every transition.
//!
//! Grounded on `original_source/include/mata/nfa/algorithms.hh`'s three
//! `revert` variants (`simple`, `somewhat-simple`, fragile in-place). The
//! reference crate's `automata` module has no graph-reversal code, so this
//! part is authored straight from the three variants' asymptotic description,
//! all converging on the same reversed relation and differing only in how
//! much of `Delta`'s internal structure they reuse versus rebuild.

use crate::nfa::Nfa;

/// Rebuilds the delta from scratch, one transition at a time: the simplest,
/// always-correct variant, and the one used when no assumption about the
/// source delta's shape can be made.
pub fn revert_simple(nfa: &Nfa) -> Nfa {
    let mut out = Nfa::with_capacity(nfa.num_of_states(), nfa.final_states.clone(), nfa.initial.clone(), nfa.alphabet.clone());
    for t in nfa.delta.transitions() {
        out.delta.add(t.target, t.symbol, t.source);
    }
    out
}

/// Same result as [`revert_simple`], but builds each target state-post via
/// `push_back`/`reconcile` instead of repeated `insert`, avoiding the binary
/// search per step at the cost of one sort pass per post at the end. Prefer
/// this variant on large, transition-dense automata.
pub fn revert_somewhat_simple(nfa: &Nfa) -> Nfa {
    use crate::delta::{Delta, SymbolPost};
    use crate::ord_vector::OrdVector;
    use crate::symbol::{State, Symbol};
    use std::collections::BTreeMap;

    let n = nfa.num_of_states();
    let mut per_state: Vec<BTreeMap<Symbol, OrdVector<State>>> = vec![BTreeMap::new(); n];
    for t in nfa.delta.transitions() {
        per_state[t.target].entry(t.symbol).or_default().push_back(t.source);
    }
    let mut delta = Delta::with_capacity(n);
    for (q, by_symbol) in per_state.into_iter().enumerate() {
        let mut posts: Vec<SymbolPost> = Vec::with_capacity(by_symbol.len());
        for (sym, mut targets) in by_symbol {
            targets.reconcile();
            posts.push(SymbolPost::with_targets(sym, targets));
        }
        let post = delta.get_mutable_post(q);
        for sp in posts {
            post.insert(sp);
        }
    }

    Nfa { delta, initial: nfa.final_states.clone(), final_states: nfa.initial.clone(), alphabet: nfa.alphabet.clone() }
}

/// Same result again, but the per-target symbol grouping goes through a
/// `Vec` indexed directly by symbol value instead of a `BTreeMap`: no
/// per-state map allocation or tree rebalancing, at the cost of one
/// `O(max_symbol)` scratch buffer held for the whole pass. Worth it only
/// when the alphabet is small and dense relative to state count; on a
/// sparse large-symbol automaton the scratch buffer dwarfs the transitions
/// it indexes.
pub fn revert_fragile(nfa: &Nfa) -> Nfa {
    use crate::delta::{Delta, SymbolPost};
    use crate::ord_vector::OrdVector;
    use crate::symbol::{State, Symbol};

    let n = nfa.num_of_states();
    let max_symbol = nfa.delta.transitions().map(|t| t.symbol).max().unwrap_or(0);

    let mut by_target: Vec<Vec<(Symbol, State)>> = vec![Vec::new(); n];
    for t in nfa.delta.transitions() {
        by_target[t.target].push((t.symbol, t.source));
    }

    // Scratch bucket, one slot per symbol value, reused (and cleared) across states.
    let mut bucket: Vec<Vec<State>> = vec![Vec::new(); max_symbol + 1];
    let mut touched: Vec<Symbol> = Vec::new();

    let mut delta = Delta::with_capacity(n);
    for (q, incoming) in by_target.into_iter().enumerate() {
        for (sym, src) in incoming {
            if bucket[sym].is_empty() {
                touched.push(sym);
            }
            bucket[sym].push(src);
        }
        touched.sort_unstable();
        let post = delta.get_mutable_post(q);
        for &sym in &touched {
            let targets = OrdVector::from_iter_unsorted(std::mem::take(&mut bucket[sym]));
            post.insert(SymbolPost::with_targets(sym, targets));
        }
        touched.clear();
    }

    Nfa { delta, initial: nfa.final_states.clone(), final_states: nfa.initial.clone(), alphabet: nfa.alphabet.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Nfa {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 1);
        a.add_transition(1, 2, 2);
        a.add_initial(0);
        a.add_final(2);
        a
    }

    #[test]
    fn revert_simple_swaps_direction_and_endpoints() {
        let a = chain();
        let r = revert_simple(&a);
        assert!(r.is_in_lang(&[2, 1]));
        assert!(!r.is_in_lang(&[1, 2]));
    }

    #[test]
    fn revert_somewhat_simple_agrees_with_revert_simple() {
        let a = chain();
        let r1 = revert_simple(&a);
        let r2 = revert_somewhat_simple(&a);
        assert_eq!(r1.is_in_lang(&[2, 1]), r2.is_in_lang(&[2, 1]));
        assert_eq!(r1.is_in_lang(&[1, 2]), r2.is_in_lang(&[1, 2]));
    }

    #[test]
    fn revert_fragile_agrees_with_revert_simple() {
        let a = chain();
        let r1 = revert_simple(&a);
        let r2 = revert_fragile(&a);
        assert_eq!(r1.is_in_lang(&[2, 1]), r2.is_in_lang(&[2, 1]));
        assert_eq!(r1.is_in_lang(&[1, 2]), r2.is_in_lang(&[1, 2]));
    }

    #[test]
    fn revert_fragile_handles_branching_targets() {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 2);
        a.add_transition(1, 1, 2);
        a.add_transition(0, 3, 2);
        a.add_initial(0);
        a.add_initial(1);
        a.add_final(2);
        let r = revert_fragile(&a);
        assert!(r.is_in_lang(&[1]));
        assert!(r.is_in_lang(&[3]));
        assert!(!r.is_in_lang(&[2]));
    }
}
