//! Canned constructions for small but common automata.
//!
//! Grounded on `original_source/include/mata/nfa/builder.hh`'s
//! `create_single_word_nfa`/`create_sigma_star_nfa` helpers.

use crate::nfa::Nfa;
use crate::ord_vector::OrdVector;
use crate::symbol::{Symbol, Word};

/// The automaton accepting exactly `word` (a straight-line chain of states).
pub fn create_single_word_nfa(word: &Word) -> Nfa {
    let mut a = Nfa::new();
    let mut q = a.add_state();
    a.add_initial(q);
    if word.is_empty() {
        a.add_final(q);
        return a;
    }
    for &sym in word {
        let next = a.add_state();
        a.add_transition(q, sym, next);
        q = next;
    }
    a.add_final(q);
    a
}

/// The automaton accepting only the empty word.
pub fn create_empty_string_nfa() -> Nfa {
    let mut a = Nfa::new();
    let q = a.add_state();
    a.add_initial(q);
    a.add_final(q);
    a
}

/// The automaton accepting `Sigma*` over `symbols`, as a single accepting
/// state with a self-loop on every symbol.
pub fn create_sigma_star_nfa(symbols: &OrdVector<Symbol>) -> Nfa {
    let mut a = Nfa::new();
    let q = a.add_state();
    a.add_initial(q);
    a.add_final(q);
    for &sym in symbols.iter() {
        a.add_transition(q, sym, q);
    }
    a
}

/// The automaton accepting no words at all (no final states).
pub fn create_empty_nfa() -> Nfa {
    let mut a = Nfa::new();
    let q = a.add_state();
    a.add_initial(q);
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_nfa_accepts_only_that_word() {
        let a = create_single_word_nfa(&vec![1, 2, 3]);
        assert!(a.is_in_lang(&[1, 2, 3]));
        assert!(!a.is_in_lang(&[1, 2]));
        assert!(!a.is_in_lang(&[1, 2, 3, 4]));
    }

    #[test]
    fn empty_word_nfa_via_empty_word() {
        let a = create_single_word_nfa(&vec![]);
        assert!(a.is_in_lang(&[]));
    }

    #[test]
    fn empty_string_nfa_accepts_only_epsilon() {
        let a = create_empty_string_nfa();
        assert!(a.is_in_lang(&[]));
        assert!(!a.is_in_lang(&[1]));
    }

    #[test]
    fn sigma_star_accepts_everything_over_its_alphabet() {
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let a = create_sigma_star_nfa(&symbols);
        assert!(a.is_in_lang(&[]));
        assert!(a.is_in_lang(&[1, 2, 1, 1, 2]));
    }

    #[test]
    fn empty_nfa_accepts_nothing() {
        let a = create_empty_nfa();
        assert!(a.is_lang_empty().is_none());
        assert!(!a.is_in_lang(&[]));
    }
}
