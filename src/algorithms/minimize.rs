//! Brzozowski minimization: reverse, determinize, reverse, determinize.
//!
//! Grounded on `original_source/include/mata/nfa/algorithms.hh`'s
//! `minimize` (documented there as dispatching to Brzozowski's double-reversal
//! construction for the common case); composed here from the crate's own
//! [`crate::algorithms::revert::revert_simple`] and
//! [`crate::algorithms::determinize::determinize`] rather than a bespoke
//! partition-refinement pass, since both primitives already exist and the
//! composition is exact.

use crate::algorithms::determinize::determinize;
use crate::algorithms::revert::revert_simple;
use crate::nfa::Nfa;

/// The minimal deterministic automaton accepting the same language as `nfa`.
pub fn minimize(nfa: &Nfa) -> Nfa {
    let mut trimmed = nfa.clone();
    trimmed.trim();
    let (step1, _) = determinize(&revert_simple(&trimmed));
    let (mut step2, _) = determinize(&revert_simple(&step1));
    step2.trim();
    step2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::product::union;
    use crate::nfa::builder::create_single_word_nfa;

    #[test]
    fn minimized_automaton_keeps_the_same_language() {
        let a = union(&create_single_word_nfa(&vec![1, 2]), &create_single_word_nfa(&vec![1, 3]));
        let m = minimize(&a);
        assert!(m.is_deterministic());
        assert!(m.is_in_lang(&[1, 2]));
        assert!(m.is_in_lang(&[1, 3]));
        assert!(!m.is_in_lang(&[1]));
        assert!(!m.is_in_lang(&[1, 4]));
    }

    #[test]
    fn minimizing_merges_equivalent_states() {
        // Two parallel chains accepting the same single word "a" should
        // collapse to a 2-state minimal DFA (start, accept).
        let mut a = Nfa::new();
        a.add_transition(0, 1, 2);
        a.add_transition(1, 1, 2);
        a.add_initial(0);
        a.add_initial(1);
        a.add_final(2);
        let m = minimize(&a);
        assert_eq!(m.num_of_states(), 2);
    }
}
