//! Complementation. Both variants determinize and complete first — a
//! nondeterministic automaton's final-state complement does not complement
//! its language — and differ only in whether the determinized automaton is
//! minimized before its final set is flipped.
//!
//! Grounded on `original_source/include/mata/nfa/algorithms.hh`'s
//! `complement` with its `algorithm` parameter switching between
//! `"classical"` and `"brzozowski"`, mirrored here as two free functions
//! rather than a string-dispatched parameter (the dispatch by string lives
//! in [`crate::params`], one layer up).

use crate::algorithms::determinize::determinize;
use crate::algorithms::minimize::minimize;
use crate::nfa::Nfa;
use crate::ord_vector::OrdVector;
use crate::symbol::Symbol;

/// Determinizes and completes `nfa` over `symbols`, then complements its final set.
pub fn complement_classical(nfa: &Nfa, symbols: &OrdVector<Symbol>) -> Nfa {
    let (mut det, _) = determinize(nfa);
    det.make_complete(symbols, None);
    det.swap_final_nonfinal();
    det
}

/// Same result as [`complement_classical`], but minimizes before completing
/// and flipping, typically producing a smaller automaton at a higher
/// up-front cost.
pub fn complement_brzozowski(nfa: &Nfa, symbols: &OrdVector<Symbol>) -> Nfa {
    let mut min = minimize(nfa);
    min.make_complete(symbols, None);
    min.swap_final_nonfinal();
    min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::builder::create_single_word_nfa;

    #[test]
    fn classical_complement_rejects_exactly_the_original_words() {
        let a = create_single_word_nfa(&vec![1, 2]);
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let comp = complement_classical(&a, &symbols);
        assert!(!comp.is_in_lang(&[1, 2]));
        assert!(comp.is_in_lang(&[1, 1]));
        assert!(comp.is_in_lang(&[]));
    }

    #[test]
    fn brzozowski_complement_agrees_with_classical() {
        let a = create_single_word_nfa(&vec![1, 2]);
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let classical = complement_classical(&a, &symbols);
        let brz = complement_brzozowski(&a, &symbols);
        for word in [vec![], vec![1], vec![1, 2], vec![2, 1], vec![1, 1, 1]] {
            assert_eq!(classical.is_in_lang(&word), brz.is_in_lang(&word), "mismatch on {word:?}");
        }
    }
}
