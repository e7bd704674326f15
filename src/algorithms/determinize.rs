//! Subset construction: builds a deterministic automaton equivalent to a
//! given NFA.
//!
//! Grounded on `original_source/include/mata/nfa/algorithms.hh`'s
//! `determinize` entry point; the work-list-plus-hashmap shape is carried
//! over from the reference crate's `impl From<&NFA> for DFA`, generalized
//! from a fixed byte alphabet to an arbitrary symbol set collected from the
//! source automaton's own transitions.

use std::collections::HashMap;

use crate::delta::StatePostExt;
use crate::nfa::Nfa;
use crate::ord_vector::OrdVector;
use crate::symbol::{State, Symbol};

/// Maps each produced macro-state back to the set of source states it stands for.
pub type DeterminizationMap = HashMap<State, OrdVector<State>>;

/// Determinizes `nfa`. Epsilon transitions, if present, are treated as
/// ordinary symbols — callers that need epsilon-free determinization should
/// run [`crate::algorithms::epsilon::remove_epsilon`] first.
pub fn determinize(nfa: &Nfa) -> (Nfa, DeterminizationMap) {
    let alphabet = collect_symbols(nfa);

    let mut out = Nfa::new();
    let mut macro_to_state: HashMap<OrdVector<State>, State> = HashMap::new();
    let mut state_to_macro: DeterminizationMap = HashMap::new();
    let mut worklist: Vec<OrdVector<State>> = Vec::new();

    let initial_macro = OrdVector::from_iter_unsorted(nfa.initial.iter());
    if initial_macro.is_empty() {
        return (out, state_to_macro);
    }
    let initial_state = out.add_state();
    out.add_initial(initial_state);
    macro_to_state.insert(initial_macro.clone(), initial_state);
    state_to_macro.insert(initial_state, initial_macro.clone());
    worklist.push(initial_macro);

    while let Some(macro_state) = worklist.pop() {
        let from = macro_to_state[&macro_state];
        if macro_state.iter().any(|&q| nfa.final_states.contains(q)) {
            out.add_final(from);
        }
        for &sym in &alphabet {
            let mut targets = Vec::new();
            for &q in macro_state.iter() {
                if let Some(sp) = nfa.delta.state_post(q).find_symbol(sym) {
                    targets.extend(sp.targets.iter().copied());
                }
            }
            if targets.is_empty() {
                continue;
            }
            let target_macro = OrdVector::from_iter_unsorted(targets);
            let to = *macro_to_state.entry(target_macro.clone()).or_insert_with(|| {
                let s = out.add_state();
                state_to_macro.insert(s, target_macro.clone());
                worklist.push(target_macro.clone());
                s
            });
            out.add_transition(from, sym, to);
        }
    }

    (out, state_to_macro)
}

fn collect_symbols(nfa: &Nfa) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = nfa.delta.transitions().map(|t| t.symbol).collect();
    symbols.sort_unstable();
    symbols.dedup();
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinizes_a_small_nondeterministic_choice() {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 1);
        a.add_transition(0, 1, 2);
        a.add_transition(1, 2, 3);
        a.add_initial(0);
        a.add_final(2);
        a.add_final(3);

        let (det, _) = determinize(&a);
        assert!(det.is_deterministic());
        assert!(det.is_in_lang(&[1]));
        assert!(det.is_in_lang(&[1, 2]));
        assert!(!det.is_in_lang(&[2]));
    }

    #[test]
    fn determinizing_an_already_deterministic_automaton_preserves_language() {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 1);
        a.add_initial(0);
        a.add_final(1);
        let (det, _) = determinize(&a);
        assert!(det.is_in_lang(&[1]));
        assert!(!det.is_in_lang(&[]));
    }

    #[test]
    fn determinizing_the_empty_automaton_yields_the_empty_automaton() {
        let a = Nfa::new();
        let (det, map) = determinize(&a);
        assert_eq!(det.num_of_states(), 0);
        assert!(map.is_empty());
    }
}
