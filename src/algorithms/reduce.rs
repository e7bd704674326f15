//! Size reduction via the simulation preorder: states that simulate each
//! other in both directions behave identically and are merged.
//!
//! Grounded on the choice of [`crate::matrix::Matrix<bool>`] for
//! exactly this kind of state-by-state relation, and on
//! `original_source/include/mata/nfa/algorithms.hh`'s `reduce`, which
//! documents simulation-based reduction as the default `relation` value.

use crate::delta::StatePostExt;
use crate::matrix::Matrix;
use crate::nfa::Nfa;
use crate::symbol::State;

/// Computes the simulation preorder: `sim[p][q]` holds when `q` simulates
/// `p` (every behaviour `p` has, `q` can match). Greatest-fixpoint
/// iteration starting from "anything simulates anything with matching
/// finality" and refining until stable.
pub fn simulation_preorder(nfa: &Nfa) -> Matrix<bool> {
    let n = nfa.num_of_states();
    let mut sim = Matrix::dynamic_rows(n, true);
    for p in 0..n {
        for q in 0..n {
            if nfa.final_states.contains(p) && !nfa.final_states.contains(q) {
                sim.set(p, q, false);
            }
        }
    }

    let symbols: Vec<_> = {
        let mut s: Vec<_> = nfa.delta.transitions().map(|t| t.symbol).collect();
        s.sort_unstable();
        s.dedup();
        s
    };

    loop {
        let mut changed = false;
        for p in 0..n {
            for q in 0..n {
                if !*sim.get(p, q) {
                    continue;
                }
                let still_holds = symbols.iter().all(|&sym| {
                    let p_targets: Vec<State> = nfa.delta.state_post(p).find_symbol(sym).map(|sp| sp.targets.as_slice().to_vec()).unwrap_or_default();
                    let q_targets: Vec<State> = nfa.delta.state_post(q).find_symbol(sym).map(|sp| sp.targets.as_slice().to_vec()).unwrap_or_default();
                    p_targets.iter().all(|&p2| q_targets.iter().any(|&q2| *sim.get(p2, q2)))
                });
                if !still_holds {
                    sim.set(p, q, false);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    sim
}

/// Merges states that simulate each other in both directions (simulation
/// equivalence), keeping one representative per class.
pub fn reduce(nfa: &Nfa) -> Nfa {
    let n = nfa.num_of_states();
    let sim = simulation_preorder(nfa);

    let mut class_of: Vec<Option<usize>> = vec![None; n];
    let mut reps: Vec<State> = Vec::new();
    for q in 0..n {
        if class_of[q].is_some() {
            continue;
        }
        let id = reps.len();
        reps.push(q);
        class_of[q] = Some(id);
        for p in (q + 1)..n {
            if class_of[p].is_none() && *sim.get(q, p) && *sim.get(p, q) {
                class_of[p] = Some(id);
            }
        }
    }

    let mut out = Nfa::with_capacity(reps.len(), Default::default(), Default::default(), nfa.alphabet.clone());
    for q in 0..n {
        let cq = class_of[q].unwrap();
        if nfa.initial.contains(q) {
            out.add_initial(cq);
        }
        if nfa.final_states.contains(q) {
            out.add_final(cq);
        }
        for (sym, t) in nfa.delta.state_post(q).moves() {
            out.add_transition(cq, sym, class_of[t].unwrap());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_two_bisimilar_parallel_states() {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 2);
        a.add_transition(1, 1, 2);
        a.add_initial(0);
        a.add_initial(1);
        a.add_final(2);
        let r = reduce(&a);
        assert_eq!(r.num_of_states(), 2);
        assert!(r.is_in_lang(&[1]));
    }

    #[test]
    fn distinct_states_are_not_merged() {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 1);
        a.add_initial(0);
        a.add_final(1);
        let r = reduce(&a);
        assert_eq!(r.num_of_states(), 2);
        assert!(r.is_in_lang(&[1]));
        assert!(!r.is_in_lang(&[]));
    }
}
