//! Universality, inclusion and equivalence checks, each offered in a naive
//! form (reduce to determinization and emptiness) and an antichain form
//! (explore subset pairs on the fly, pruned by subsumption, without ever
//! determinizing the right-hand side).
//!
//! Grounded on `original_source/include/mata/nfa/algorithms.hh`'s
//! `is_universal`/`is_included`/`are_equivalent`, each documented there with
//! the same naive/antichains split.

use crate::algorithms::complement::complement_classical;
use crate::algorithms::product::intersection;
use crate::delta::StatePostExt;
use crate::nfa::builder::create_sigma_star_nfa;
use crate::nfa::Nfa;
use crate::ord_vector::OrdVector;
use crate::symbol::{State, Symbol};

/// `L(nfa) == Sigma*` over `symbols`, checked by complementing and testing emptiness.
pub fn is_universal_naive(nfa: &Nfa, symbols: &OrdVector<Symbol>) -> bool {
    complement_classical(nfa, symbols).is_lang_empty().is_none()
}

/// `L(a) subseteq L(b)` over `symbols`, checked by intersecting `a` with the
/// complement of `b` and testing emptiness.
pub fn is_included_naive(a: &Nfa, b: &Nfa, symbols: &OrdVector<Symbol>) -> bool {
    let not_b = complement_classical(b, symbols);
    intersection(a, &not_b).is_lang_empty().is_none()
}

/// `L(a) == L(b)` over `symbols`.
pub fn are_equivalent_naive(a: &Nfa, b: &Nfa, symbols: &OrdVector<Symbol>) -> bool {
    is_included_naive(a, b, symbols) && is_included_naive(b, a, symbols)
}

/// `L(nfa) == Sigma*` over `symbols`, specialised as inclusion of `Sigma*` in
/// `nfa` so the right-hand side is never determinized or complemented.
pub fn is_universal_antichains(nfa: &Nfa, symbols: &OrdVector<Symbol>) -> bool {
    let sigma_star = create_sigma_star_nfa(symbols);
    is_included_antichains(&sigma_star, nfa, symbols)
}

/// `L(a) == L(b)` over `symbols`, via interleaved two-way antichain inclusion
/// (neither direction determinizes or complements its operand).
pub fn are_equivalent_antichains(a: &Nfa, b: &Nfa, symbols: &OrdVector<Symbol>) -> bool {
    is_included_antichains(a, b, symbols) && is_included_antichains(b, a, symbols)
}

/// `L(a) subseteq L(b)` via on-the-fly antichain exploration: never
/// determinizes or complements `b`, instead tracking, for each state `p` of
/// `a`, the set of subset-of-`b`-states reachable by the same word, pruned
/// by subsumption (a pair `(p, S)` is redundant once some already-explored
/// pair `(p, S')` with `S' subseteq S` has been found, since anything `S`
/// can do, `S'` can do too).
pub fn is_included_antichains(a: &Nfa, b: &Nfa, _symbols: &OrdVector<Symbol>) -> bool {
    let b_closure = |states: &[State]| -> OrdVector<State> {
        let mut out = std::collections::BTreeSet::new();
        for &s in states {
            out.extend(b.epsilon_closure(s).iter().copied());
        }
        OrdVector::from_iter_unsorted(out)
    };

    let mut seen_per_state: std::collections::HashMap<State, Vec<OrdVector<State>>> = std::collections::HashMap::new();
    let mut worklist: Vec<(State, OrdVector<State>)> = Vec::new();
    let b_init_macro = b_closure(&b.initial.iter().collect::<Vec<_>>());

    for p0 in a.epsilon_closure_states(&a.initial.iter().collect::<Vec<_>>()) {
        push_if_not_subsumed(&mut worklist, &mut seen_per_state, p0, b_init_macro.clone());
    }

    while let Some((p, s_set)) = worklist.pop() {
        if a.final_states.contains(p) && !s_set.iter().any(|q| b.final_states.contains(*q)) {
            return false;
        }
        let symbols_from_p: Vec<Symbol> = a.delta.state_post(p).iter().map(|sp| sp.symbol).collect();
        for &sym in &symbols_from_p {
            let Some(sp) = a.delta.state_post(p).find_symbol(sym) else { continue };
            let next_s_raw: Vec<State> = s_set.iter().filter_map(|&q| b.delta.state_post(q).find_symbol(sym)).flat_map(|sp| sp.targets.iter().copied()).collect();
            let next_s = b_closure(&next_s_raw);
            for &p2 in sp.targets.iter() {
                push_if_not_subsumed(&mut worklist, &mut seen_per_state, p2, next_s.clone());
            }
        }
    }

    true
}

fn push_if_not_subsumed(
    worklist: &mut Vec<(State, OrdVector<State>)>,
    seen: &mut std::collections::HashMap<State, Vec<OrdVector<State>>>,
    p: State,
    s_set: OrdVector<State>,
) {
    let entry = seen.entry(p).or_default();
    if entry.iter().any(|prev| prev.is_subset_of(&s_set)) {
        return;
    }
    entry.retain(|prev| !s_set.is_subset_of(prev));
    entry.push(s_set.clone());
    worklist.push((p, s_set));
}

trait EpsilonClosureStates {
    fn epsilon_closure_states(&self, states: &[State]) -> Vec<State>;
}

impl EpsilonClosureStates for Nfa {
    fn epsilon_closure_states(&self, states: &[State]) -> Vec<State> {
        let mut out = std::collections::BTreeSet::new();
        for &s in states {
            out.extend(self.epsilon_closure(s).iter().copied());
        }
        out.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::builder::{create_sigma_star_nfa, create_single_word_nfa};

    #[test]
    fn sigma_star_is_universal() {
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let a = create_sigma_star_nfa(&symbols);
        assert!(is_universal_naive(&a, &symbols));
        let b = create_single_word_nfa(&vec![1]);
        assert!(!is_universal_naive(&b, &symbols));
    }

    #[test]
    fn inclusion_naive_and_antichains_agree() {
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let small = create_single_word_nfa(&vec![1, 2]);
        let big = create_sigma_star_nfa(&symbols);
        assert!(is_included_naive(&small, &big, &symbols));
        assert!(is_included_antichains(&small, &big, &symbols));
        assert!(!is_included_naive(&big, &small, &symbols));
        assert!(!is_included_antichains(&big, &small, &symbols));
    }

    #[test]
    fn equivalence_detects_identical_single_word_languages() {
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let a = create_single_word_nfa(&vec![1, 2]);
        let b = create_single_word_nfa(&vec![1, 2]);
        let c = create_single_word_nfa(&vec![2, 1]);
        assert!(are_equivalent_naive(&a, &b, &symbols));
        assert!(!are_equivalent_naive(&a, &c, &symbols));
    }

    #[test]
    fn universality_naive_and_antichains_agree() {
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let sigma_star = create_sigma_star_nfa(&symbols);
        assert!(is_universal_naive(&sigma_star, &symbols));
        assert!(is_universal_antichains(&sigma_star, &symbols));
        let single = create_single_word_nfa(&vec![1]);
        assert!(!is_universal_naive(&single, &symbols));
        assert!(!is_universal_antichains(&single, &symbols));
    }

    #[test]
    fn equivalence_naive_and_antichains_agree() {
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let a = create_single_word_nfa(&vec![1, 2]);
        let b = create_single_word_nfa(&vec![1, 2]);
        let c = create_single_word_nfa(&vec![2, 1]);
        assert_eq!(are_equivalent_naive(&a, &b, &symbols), are_equivalent_antichains(&a, &b, &symbols));
        assert_eq!(are_equivalent_naive(&a, &c, &symbols), are_equivalent_antichains(&a, &c, &symbols));
    }
}
