//! Binary automaton combinators: the general product, and union and
//! concatenation built from the automaton's own state-shifting primitives.
//!
//! Grounded on `original_source/include/mata/nfa/algorithms.hh`'s
//! `intersection`/`concatenate`/`union_nondet` family.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::delta::StatePostExt;
use crate::nfa::Nfa;
use crate::sparse_set::SparseSet;
use crate::symbol::{State, Symbol, EPSILON};

/// The general synchronized product of `a` and `b`: states are pairs,
/// allocated on demand through a `(State, State) -> State` map. Symbols
/// `< first_epsilon` are synchronized (both sides must offer a move on the
/// same symbol); symbols `>= first_epsilon` are epsilon-like and lift a move
/// from either side alone straight into the product, leaving the other
/// component unchanged. `is_final(a_is_final, b_is_final)` decides
/// acceptance of a product pair — conjunction gives intersection, disjunction
/// gives the reachability-style check used by the inclusion/universality
/// checks that only need to know whether *either* side can still accept.
///
/// Pairs are expanded in FIFO order and each state-post's symbols are visited
/// in ascending order (the order `StatePost` already keeps them in), so two
/// calls with the same inputs build byte-identical automata.
pub fn product(a: &Nfa, b: &Nfa, first_epsilon: Symbol, is_final: impl Fn(bool, bool) -> bool) -> Nfa {
    let mut out = Nfa::new();
    let mut pair_to_state: HashMap<(State, State), State> = HashMap::new();
    let mut worklist: VecDeque<(State, State)> = VecDeque::new();

    for i1 in a.initial.iter() {
        for i2 in b.initial.iter() {
            let s = *pair_to_state.entry((i1, i2)).or_insert_with(|| {
                let s = out.add_state();
                worklist.push_back((i1, i2));
                s
            });
            out.add_initial(s);
        }
    }

    while let Some((q1, q2)) = worklist.pop_front() {
        let from = pair_to_state[&(q1, q2)];
        if is_final(a.final_states.contains(q1), b.final_states.contains(q2)) {
            out.add_final(from);
        }

        for sp_a in a.delta.state_post(q1).iter() {
            if sp_a.symbol < first_epsilon {
                let Some(sp_b) = b.delta.state_post(q2).find_symbol(sp_a.symbol) else { continue };
                for &p1 in sp_a.targets.iter() {
                    for &p2 in sp_b.targets.iter() {
                        let to = *pair_to_state.entry((p1, p2)).or_insert_with(|| {
                            let s = out.add_state();
                            worklist.push_back((p1, p2));
                            s
                        });
                        out.add_transition(from, sp_a.symbol, to);
                    }
                }
            } else {
                for &p1 in sp_a.targets.iter() {
                    let to = *pair_to_state.entry((p1, q2)).or_insert_with(|| {
                        let s = out.add_state();
                        worklist.push_back((p1, q2));
                        s
                    });
                    out.add_transition(from, sp_a.symbol, to);
                }
            }
        }

        for sp_b in b.delta.state_post(q2).iter() {
            if sp_b.symbol >= first_epsilon {
                for &p2 in sp_b.targets.iter() {
                    let to = *pair_to_state.entry((q1, p2)).or_insert_with(|| {
                        let s = out.add_state();
                        worklist.push_back((q1, p2));
                        s
                    });
                    out.add_transition(from, sp_b.symbol, to);
                }
            }
        }
    }

    out
}

/// The synchronized product of `a` and `b`: accepts exactly the words
/// accepted by both. A thin specialization of [`product`]: `EPSILON` is the
/// threshold, so only genuine epsilon moves lift unsynchronized, and the
/// final predicate is conjunction.
pub fn intersection(a: &Nfa, b: &Nfa) -> Nfa {
    product(a, b, EPSILON, |fa, fb| fa && fb)
}

/// Union: shifts `b`'s state ids past `a`'s, takes the union of initial and
/// final sets, and merges the two deltas.
pub fn union(a: &Nfa, b: &Nfa) -> Nfa {
    let shift = a.num_of_states();
    let mut out = a.clone();
    for t in b.delta.transitions() {
        out.add_transition(t.source + shift, t.symbol, t.target + shift);
    }
    for q in b.initial.iter() {
        out.add_initial(q + shift);
    }
    for q in b.final_states.iter() {
        out.add_final(q + shift);
    }
    out
}

/// Cheaper union for two automata whose state-id ranges are already known to
/// be disjoint: merges deltas and initial/final sets without renaming either
/// side. Panics if the ranges overlap.
pub fn union_no_rename(a: &Nfa, b: &Nfa) -> Nfa {
    let a_states: BTreeSet<State> = (0..a.num_of_states()).collect();
    let b_states: BTreeSet<State> = (0..b.num_of_states()).collect();
    assert!(a_states.is_disjoint(&b_states), "union_no_rename requires disjoint state ids");

    let n = a.num_of_states().max(b.num_of_states());
    let alphabet = a.alphabet.clone().or_else(|| b.alphabet.clone());
    let mut out = Nfa::with_capacity(n, a.initial.clone(), a.final_states.clone(), alphabet);
    for t in a.delta.transitions() {
        out.add_transition(t.source, t.symbol, t.target);
    }
    for t in b.delta.transitions() {
        out.add_transition(t.source, t.symbol, t.target);
    }
    for q in b.initial.iter() {
        out.add_initial(q);
    }
    for q in b.final_states.iter() {
        out.add_final(q);
    }
    out
}

/// Concatenation: renumbers `b`'s states to follow `a`'s, then either (when
/// `use_epsilon`) links every final of `a` to every initial of `b` by an
/// epsilon move, or (the default) inlines every initial state of `b`'s
/// outgoing moves directly onto every final state of `a`, skipping the
/// epsilon hop entirely. Either way `a`'s finals stop being final and `b`'s
/// (shifted) finals become the result's finals; an `a`-final is restored as
/// final only when every one of `b`'s initial states is itself final in `b`.
pub fn concatenate(a: &Nfa, b: &Nfa, use_epsilon: bool) -> Nfa {
    let shift = a.num_of_states();
    let mut out = a.clone();
    out.final_states = SparseSet::new();

    for t in b.delta.transitions() {
        out.add_transition(t.source + shift, t.symbol, t.target + shift);
    }

    if use_epsilon {
        for q1 in a.final_states.iter() {
            for q2 in b.initial.iter() {
                out.add_transition(q1, EPSILON, q2 + shift);
            }
        }
    } else {
        for q1 in a.final_states.iter() {
            for q2 in b.initial.iter() {
                for (sym, t) in b.delta.state_post(q2).moves() {
                    out.add_transition(q1, sym, t + shift);
                }
            }
        }
    }

    for q in b.final_states.iter() {
        out.add_final(q + shift);
    }
    if !b.initial.is_empty() && b.initial.iter().all(|q| b.final_states.contains(q)) {
        for q in a.final_states.iter() {
            out.add_final(q);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::builder::create_single_word_nfa;

    #[test]
    fn intersection_accepts_only_the_shared_word() {
        let a = create_single_word_nfa(&vec![1, 2]);
        let b = create_single_word_nfa(&vec![1, 2]);
        let c = create_single_word_nfa(&vec![1, 3]);
        assert!(intersection(&a, &b).is_in_lang(&[1, 2]));
        assert!(intersection(&a, &c).is_lang_empty().is_none());
    }

    #[test]
    fn product_with_disjunction_accepts_whatever_either_side_accepts() {
        let a = create_single_word_nfa(&vec![1]);
        let b = create_single_word_nfa(&vec![2]);
        let p = product(&a, &b, EPSILON, |fa, fb| fa || fb);
        assert!(p.is_in_lang(&[1, 2]));
    }

    #[test]
    fn product_lifts_symbols_at_or_above_first_epsilon_unsynchronized() {
        // `a` has a "loud" move on symbol 9 from its only state; treating 9 as
        // epsilon-like (first_epsilon = 9) must let it fire without `b`
        // needing a matching move.
        let mut a = Nfa::new();
        a.add_transition(0, 9, 1);
        a.add_initial(0);
        a.add_final(1);
        let b = create_single_word_nfa(&vec![2]);
        let p = product(&a, &b, 9, |fa, _| fa);
        assert!(p.is_in_lang(&[9]));
    }

    #[test]
    fn union_accepts_either_operands_language() {
        let a = create_single_word_nfa(&vec![1]);
        let b = create_single_word_nfa(&vec![2]);
        let u = union(&a, &b);
        assert!(u.is_in_lang(&[1]));
        assert!(u.is_in_lang(&[2]));
        assert!(!u.is_in_lang(&[3]));
    }

    #[test]
    fn union_no_rename_agrees_with_union_on_disjoint_operands() {
        let a = create_single_word_nfa(&vec![1]);
        let b = create_single_word_nfa(&vec![2]);
        let shifted_b = {
            let shift = a.num_of_states();
            let mut out = Nfa::new();
            for t in b.delta.transitions() {
                out.add_transition(t.source + shift, t.symbol, t.target + shift);
            }
            for q in b.initial.iter() {
                out.add_initial(q + shift);
            }
            for q in b.final_states.iter() {
                out.add_final(q + shift);
            }
            out
        };
        let u = union_no_rename(&a, &shifted_b);
        assert!(u.is_in_lang(&[1]));
        assert!(u.is_in_lang(&[2]));
    }

    #[test]
    #[should_panic]
    fn union_no_rename_rejects_overlapping_ranges() {
        let a = create_single_word_nfa(&vec![1]);
        let b = create_single_word_nfa(&vec![2]);
        union_no_rename(&a, &b);
    }

    #[test]
    fn concatenate_accepts_the_word_made_of_both_parts() {
        let a = create_single_word_nfa(&vec![1]);
        let b = create_single_word_nfa(&vec![2]);
        for use_epsilon in [false, true] {
            let c = concatenate(&a, &b, use_epsilon);
            assert!(c.is_in_lang(&[1, 2]), "use_epsilon={use_epsilon}");
            assert!(!c.is_in_lang(&[1]), "use_epsilon={use_epsilon}");
            assert!(!c.is_in_lang(&[2]), "use_epsilon={use_epsilon}");
        }
    }

    #[test]
    fn concatenate_without_epsilon_adds_no_epsilon_moves() {
        let a = create_single_word_nfa(&vec![1]);
        let b = create_single_word_nfa(&vec![2]);
        let c = concatenate(&a, &b, false);
        assert!(c.delta.transitions().all(|t| t.symbol != EPSILON));
    }

    #[test]
    fn concatenate_preserves_l_final_only_when_every_r_initial_is_final_in_r() {
        // b: initial 0 is itself final, and is the only initial state, so
        // a's final should remain final (the empty word continues to match).
        let a = create_single_word_nfa(&vec![1]);
        let mut b = Nfa::new();
        b.add_initial(0);
        b.add_final(0);
        let c = concatenate(&a, &b, false);
        assert!(c.is_in_lang(&[1]));
    }
}
