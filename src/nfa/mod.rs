//! The automaton value: delta plus initial/final sparse sets, plus the
//! structural and query operations.
//!
//! Grounded on `original_source/include/mata/nfa/nfa.hh`. The reference
//! crate's `automata::nfa::NFA` contributes the Rust-side shape of
//! `new_state`/`connect`/`connect_via` (generalized here from Thompson
//! pattern construction to general-purpose delta mutation) and its
//! `eps_matrix`/epsilon-closure DFS helper, generalized into
//! [`Nfa::epsilon_closure`].

pub mod builder;
pub mod lvlfa;
mod scc;

use std::rc::Rc;

use crate::alphabet::Alphabet;
use crate::delta::{Delta, StatePostExt};
use crate::ord_vector::OrdVector;
use crate::sparse_set::SparseSet;
use crate::symbol::{State, Symbol, Word, EPSILON};

use scc::{tarjan_scc, TarjanCallbacks};

/// A nondeterministic finite automaton on finite words.
#[derive(Clone)]
pub struct Nfa {
    pub delta: Delta,
    pub initial: SparseSet,
    pub final_states: SparseSet,
    pub alphabet: Option<Rc<dyn Alphabet>>,
}

impl std::fmt::Debug for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nfa")
            .field("delta", &self.delta)
            .field("initial", &self.initial)
            .field("final_states", &self.final_states)
            .finish()
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Nfa::new()
    }
}

impl Nfa {
    /// An empty automaton.
    pub fn new() -> Self {
        Nfa { delta: Delta::new(), initial: SparseSet::new(), final_states: SparseSet::new(), alphabet: None }
    }

    /// Preallocates `n` states.
    pub fn with_capacity(n: usize, initial: SparseSet, final_states: SparseSet, alphabet: Option<Rc<dyn Alphabet>>) -> Self {
        Nfa { delta: Delta::with_capacity(n), initial, final_states, alphabet }
    }

    /// Number of states currently known to the delta.
    pub fn num_of_states(&self) -> usize {
        self.delta.num_of_states()
    }

    /// Allocates the next state and returns its identifier.
    pub fn add_state(&mut self) -> State {
        let q = self.delta.num_of_states();
        self.delta.emplace_back();
        q
    }

    /// Widens the delta to at least `q + 1` state-posts.
    pub fn add_state_at(&mut self, q: State) {
        if q >= self.delta.num_of_states() {
            self.delta.increase_size(q + 1);
        }
    }

    pub fn add_initial(&mut self, q: State) {
        self.add_state_at(q);
        self.initial.insert(q);
    }

    pub fn add_final(&mut self, q: State) {
        self.add_state_at(q);
        self.final_states.insert(q);
    }

    /// Forwarding helper: `delta.add(src, sym, tgt)`, widening the state set as needed.
    pub fn add_transition(&mut self, src: State, sym: Symbol, tgt: State) {
        self.add_state_at(src.max(tgt));
        self.delta.add(src, sym, tgt);
    }

    /// The ε-closure of `q`: every state reachable from `q` via zero or more
    /// EPSILON transitions, including `q` itself.
    pub fn epsilon_closure(&self, q: State) -> OrdVector<State> {
        let mut visited = vec![false; self.num_of_states().max(q + 1)];
        let mut stack = vec![q];
        let mut out = Vec::new();
        while let Some(s) = stack.pop() {
            if s >= visited.len() {
                visited.resize(s + 1, false);
            }
            if visited[s] {
                continue;
            }
            visited[s] = true;
            out.push(s);
            for (_, t) in self.delta.state_post(s).epsilon_moves() {
                if !visited.get(t).copied().unwrap_or(false) {
                    stack.push(t);
                }
            }
        }
        OrdVector::from_iter_unsorted(out)
    }

    fn successors_all(&self, q: State) -> Vec<State> {
        self.delta.state_post(q).moves().map(|(_, t)| t).collect()
    }

    fn reverse_delta(&self) -> Vec<Vec<(Symbol, State)>> {
        let n = self.num_of_states();
        let mut rev = vec![Vec::new(); n];
        for t in self.delta.transitions() {
            rev[t.target].push((t.symbol, t.source));
        }
        rev
    }

    /// States reachable from some initial state. Built on [`tarjan_scc`],
    /// rooted at the initial states, using only the `on_state_discover` hook.
    pub fn get_reachable_states(&self) -> Vec<bool> {
        let n = self.num_of_states();
        let mut seen = vec![false; n];
        let mut on_state = |q: State| seen[q] = true;
        let mut noop_scc = |_: &[State]| {};
        let mut noop_edge = |_: State, _: State| {};
        let mut cb = TarjanCallbacks { on_state_discover: &mut on_state, on_scc_discover: &mut noop_scc, on_successor: &mut noop_edge };
        tarjan_scc(n, self.initial.iter(), |q| self.successors_all(q), &mut cb);
        seen
    }

    /// States from which some final state is reachable. Built on
    /// [`tarjan_scc`] over the reverse delta, rooted at the final states.
    pub fn get_co_reachable_states(&self) -> Vec<bool> {
        let n = self.num_of_states();
        let rev = self.reverse_delta();
        let mut seen = vec![false; n];
        let mut on_state = |q: State| seen[q] = true;
        let mut noop_scc = |_: &[State]| {};
        let mut noop_edge = |_: State, _: State| {};
        let mut cb = TarjanCallbacks { on_state_discover: &mut on_state, on_scc_discover: &mut noop_scc, on_successor: &mut noop_edge };
        tarjan_scc(n, self.final_states.iter(), |q| rev[q].iter().map(|&(_, t)| t).collect(), &mut cb);
        seen
    }

    /// States both reachable from an initial state and co-reachable to a final state.
    pub fn get_useful_states(&self) -> Vec<bool> {
        let reachable = self.get_reachable_states();
        let co_reachable = self.get_co_reachable_states();
        reachable.into_iter().zip(co_reachable).map(|(a, b)| a && b).collect()
    }

    /// Compacts the automaton to its useful states. Returns the old-to-new
    /// state renaming (states that were dropped map to `State::MAX`).
    pub fn trim(&mut self) -> Vec<State> {
        let useful = self.get_useful_states();
        let n = self.num_of_states();
        let mut renaming = vec![State::MAX; n];
        let mut next = 0;
        for q in 0..n {
            if useful[q] {
                renaming[q] = next;
                next += 1;
            }
        }
        self.delta.defragment(&useful, &renaming);
        self.initial.filter(|q| useful[q]);
        self.initial.rename(|q| renaming[q]);
        self.final_states.filter(|q| useful[q]);
        self.final_states.rename(|q| renaming[q]);
        renaming
    }

    /// If there is more than one initial state, routes them all through one
    /// fresh state and makes that the sole initial state. No-op if there are
    /// zero or one initial states.
    pub fn unify_initial(&mut self) {
        if self.initial.len() <= 1 {
            return;
        }
        let fresh = self.add_state();
        let old_initials: Vec<State> = self.initial.iter().collect();
        for &q in &old_initials {
            for (sym, t) in self.delta.state_post(q).moves().collect::<Vec<_>>() {
                self.delta.add(fresh, sym, t);
            }
            if self.final_states.contains(q) {
                self.final_states.insert(fresh);
            }
        }
        self.initial = SparseSet::from_iter([fresh]);
    }

    /// Same as [`Nfa::unify_initial`], mirrored for final states: routes all
    /// finals' incoming transitions through one fresh final state.
    pub fn unify_final(&mut self) {
        if self.final_states.len() <= 1 {
            return;
        }
        let fresh = self.add_state();
        let old_finals: Vec<State> = self.final_states.iter().collect();
        for t in self.delta.transitions().collect::<Vec<_>>() {
            if old_finals.contains(&t.target) {
                self.delta.add(t.source, t.symbol, fresh);
            }
        }
        if old_finals.iter().any(|q| self.initial.contains(*q)) {
            self.initial.insert(fresh);
        }
        self.final_states = SparseSet::from_iter([fresh]);
    }

    /// Complements the final set with respect to the full state domain.
    pub fn swap_final_nonfinal(&mut self) {
        self.final_states = self.final_states.complement(self.num_of_states());
    }

    /// Adds `state --sym--> sink` for every state/symbol in `symbols` lacking
    /// an outgoing transition on that symbol. Allocates `sink` if none was
    /// supplied and a transition was added. Idempotent.
    pub fn make_complete(&mut self, symbols: &OrdVector<Symbol>, sink: Option<State>) -> State {
        let n = self.num_of_states();
        let mut sink_state = sink;
        let mut added_any = false;
        for q in 0..n {
            for &sym in symbols.iter() {
                if self.delta.state_post(q).find_symbol(sym).is_none() {
                    let s = *sink_state.get_or_insert_with(|| {
                        added_any = true;
                        self.add_state()
                    });
                    self.delta.add(q, sym, s);
                    added_any = true;
                }
            }
        }
        let s = sink_state.unwrap_or_else(|| self.add_state());
        if added_any {
            for &sym in symbols.iter() {
                if self.delta.state_post(s).find_symbol(sym).is_none() {
                    self.delta.add(s, sym, s);
                }
            }
        }
        s
    }

    /// Precondition: `is_deterministic()`. Completes, then complements the final set.
    pub fn complement_deterministic(&mut self, symbols: &OrdVector<Symbol>, sink: Option<State>) -> crate::error::Result<()> {
        if !self.is_deterministic() {
            return Err(crate::error::Error::UnsupportedOperation(
                "complement_deterministic requires a deterministic automaton".into(),
            ));
        }
        self.make_complete(symbols, sink);
        self.swap_final_nonfinal();
        Ok(())
    }

    /// Collapses every transition's symbol to `x`, yielding a directed-graph view.
    pub fn get_one_letter_aut(&self, x: Symbol) -> Nfa {
        let mut out = Nfa::with_capacity(self.num_of_states(), self.initial.clone(), self.final_states.clone(), self.alphabet.clone());
        for t in self.delta.transitions() {
            out.delta.add(t.source, x, t.target);
        }
        out
    }

    /// BFS on the reverse automaton from final states; returns the shortest accepted words.
    pub fn get_shortest_words(&self) -> Vec<Word> {
        if self.initial.iter().any(|q| self.final_states.contains(q)) {
            return vec![Vec::new()];
        }
        let rev = self.reverse_delta();
        let n = self.num_of_states();
        let mut dist = vec![usize::MAX; n];
        let mut words: Vec<Option<Word>> = vec![None; n];
        let mut queue = std::collections::VecDeque::new();
        for q in self.final_states.iter() {
            dist[q] = 0;
            words[q] = Some(Vec::new());
            queue.push_back(q);
        }
        let mut best: Option<(usize, Word)> = None;
        while let Some(q) = queue.pop_front() {
            if self.initial.contains(q) {
                let w = words[q].clone().unwrap();
                let better = match &best {
                    Some((d, _)) => dist[q] < *d,
                    None => true,
                };
                if better {
                    best = Some((dist[q], w));
                }
                continue;
            }
            for &(sym, from) in &rev[q] {
                if dist[from] > dist[q] + 1 {
                    dist[from] = dist[q] + 1;
                    let mut w = vec![sym];
                    w.extend(words[q].clone().unwrap());
                    words[from] = Some(w);
                    queue.push_back(from);
                }
            }
        }
        best.map(|(_, w)| vec![w]).unwrap_or_default()
    }

    /// Enumerates all accepted words of length `<= max_len` via bounded DFS.
    pub fn get_words(&self, max_len: usize) -> Vec<Word> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        for q0 in self.initial.iter() {
            self.get_words_rec(q0, max_len, &mut prefix, &mut out);
        }
        out.sort();
        out.dedup();
        out
    }

    fn get_words_rec(&self, q: State, budget: usize, prefix: &mut Word, out: &mut Vec<Word>) {
        if self.final_states.contains(q) {
            out.push(prefix.clone());
        }
        if budget == 0 {
            return;
        }
        for (sym, t) in self.delta.state_post(q).moves().collect::<Vec<_>>() {
            prefix.push(sym);
            self.get_words_rec(t, budget - 1, prefix, out);
            prefix.pop();
        }
    }

    /// Tarjan-SCC with the discovery hook rejecting any non-trivial SCC (and
    /// trivial SCCs that carry a self-loop).
    pub fn is_acyclic(&self) -> bool {
        let n = self.num_of_states();
        let mut acyclic = true;
        let mut on_scc = |scc: &[State]| {
            if scc.len() > 1 {
                acyclic = false;
            } else {
                let q = scc[0];
                if self.delta.state_post(q).moves().any(|(_, t)| t == q) {
                    acyclic = false;
                }
            }
        };
        let mut noop_state = |_: State| {};
        let mut noop_edge = |_: State, _: State| {};
        let mut cb = TarjanCallbacks {
            on_state_discover: &mut noop_state,
            on_scc_discover: &mut on_scc,
            on_successor: &mut noop_edge,
        };
        tarjan_scc(n, 0..n, |q| self.successors_all(q), &mut cb);
        acyclic
    }

    /// Standard NFA simulation with a two-layer visited set (current frontier,
    /// epsilon-closed). Returns whether `word` is accepted.
    pub fn is_in_lang(&self, word: &[Symbol]) -> bool {
        let mut frontier = self.epsilon_closure_of_set(self.initial.iter().collect());
        for &sym in word {
            let mut next = std::collections::BTreeSet::new();
            for &q in &frontier {
                if let Some(sp) = self.delta.state_post(q).find_symbol(sym) {
                    next.extend(sp.targets.iter().copied());
                }
            }
            frontier = self.epsilon_closure_of_set(next.into_iter().collect());
            if frontier.is_empty() {
                return false;
            }
        }
        frontier.iter().any(|q| self.final_states.contains(*q))
    }

    /// Like [`Nfa::is_in_lang`], but returns true as soon as a final state is
    /// reached, even before the whole word is consumed.
    pub fn is_prfx_in_lang(&self, word: &[Symbol]) -> bool {
        let mut frontier = self.epsilon_closure_of_set(self.initial.iter().collect());
        if frontier.iter().any(|q| self.final_states.contains(*q)) {
            return true;
        }
        for &sym in word {
            let mut next = std::collections::BTreeSet::new();
            for &q in &frontier {
                if let Some(sp) = self.delta.state_post(q).find_symbol(sym) {
                    next.extend(sp.targets.iter().copied());
                }
            }
            frontier = self.epsilon_closure_of_set(next.into_iter().collect());
            if frontier.iter().any(|q| self.final_states.contains(*q)) {
                return true;
            }
            if frontier.is_empty() {
                return false;
            }
        }
        false
    }

    fn epsilon_closure_of_set(&self, states: Vec<State>) -> std::collections::BTreeSet<State> {
        let mut out = std::collections::BTreeSet::new();
        for q in states {
            out.extend(self.epsilon_closure(q).iter().copied());
        }
        out
    }

    /// Exactly one initial state and every symbol-post has a single-element target set.
    pub fn is_deterministic(&self) -> bool {
        if self.initial.len() != 1 {
            return false;
        }
        (0..self.num_of_states())
            .all(|q| self.delta.state_post(q).iter().all(|sp| sp.targets.len() == 1))
    }

    /// For every reachable state and every alphabet symbol, a transition exists.
    pub fn is_complete(&self, symbols: &OrdVector<Symbol>) -> bool {
        let reachable = self.get_reachable_states();
        (0..self.num_of_states())
            .filter(|&q| reachable[q])
            .all(|q| symbols.iter().all(|&sym| self.delta.state_post(q).find_symbol(sym).is_some()))
    }

    /// Whether the language is empty, with a witness word and state path if not.
    /// BFS over the epsilon-closed transition relation from initial states.
    /// Every newly discovered state, whether reached by a symbol move or by an
    /// epsilon move, is epsilon-closed in turn before the search moves on, so
    /// a final state reachable only via an epsilon edge after a symbol step is
    /// not missed.
    pub fn is_lang_empty(&self) -> Option<(Word, Vec<State>)> {
        let mut queue = std::collections::VecDeque::new();
        let mut visited = vec![false; self.num_of_states()];
        let mut parent: Vec<Option<(State, Symbol)>> = vec![None; self.num_of_states()];

        let start_closure: std::collections::BTreeSet<State> =
            self.epsilon_closure_of_set(self.initial.iter().collect());
        for &q in &start_closure {
            visited[q] = true;
            queue.push_back(q);
        }
        let mut found_final = start_closure.iter().find(|&&q| self.final_states.contains(q)).copied();

        // Marks `u` discovered via `(from, sym)`, chases its epsilon-closure
        // eagerly, and returns the first final state hit (if any) along the way.
        let mut discover = |visited: &mut Vec<bool>, parent: &mut Vec<Option<(State, Symbol)>>,
                            queue: &mut std::collections::VecDeque<State>, from: State, sym: Symbol, u: State| {
            if visited[u] {
                return None;
            }
            visited[u] = true;
            parent[u] = Some((from, sym));
            queue.push_back(u);
            let mut hit = if self.final_states.contains(u) { Some(u) } else { None };

            let mut eps_stack = vec![u];
            while let Some(s) = eps_stack.pop() {
                for (_, t) in self.delta.state_post(s).epsilon_moves() {
                    if !visited[t] {
                        visited[t] = true;
                        parent[t] = Some((s, EPSILON));
                        queue.push_back(t);
                        if hit.is_none() && self.final_states.contains(t) {
                            hit = Some(t);
                        }
                        eps_stack.push(t);
                    }
                }
            }
            hit
        };

        'search: while found_final.is_none() {
            let Some(q) = queue.pop_front() else { break };
            for (sym, t) in self.delta.state_post(q).alphabet_symbol_moves() {
                if let Some(hit) = discover(&mut visited, &mut parent, &mut queue, q, sym, t) {
                    found_final = Some(hit);
                    break 'search;
                }
            }
        }

        let target = found_final?;
        let mut word = Vec::new();
        let mut path = vec![target];
        let mut cur = target;
        while let Some((p, sym)) = parent[cur] {
            if sym != EPSILON {
                word.push(sym);
            }
            path.push(p);
            cur = p;
        }
        word.reverse();
        path.reverse();
        Some((word, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(transitions: &[(State, Symbol, State)], initial: &[State], finals: &[State]) -> Nfa {
        let mut a = Nfa::new();
        for &(s, sym, t) in transitions {
            a.add_transition(s, sym, t);
        }
        for &q in initial {
            a.add_initial(q);
        }
        for &q in finals {
            a.add_final(q);
        }
        a
    }

    #[test]
    fn spec_scenario_emptiness_with_counter_example() {
        let a = make(
            &[(1, b'c' as Symbol, 2), (2, b'a' as Symbol, 4), (2, b'c' as Symbol, 1), (2, b'c' as Symbol, 3), (3, b'e' as Symbol, 5), (4, b'c' as Symbol, 8)],
            &[1, 2],
            &[8, 9],
        );
        let (word, path) = a.is_lang_empty().expect("language must not be empty");
        assert_eq!(word, vec![b'a' as Symbol, b'c' as Symbol]);
        let path_set: std::collections::BTreeSet<_> = path.into_iter().collect();
        assert_eq!(path_set, [2, 4, 8].into_iter().collect());
    }

    #[test]
    fn empty_automaton_has_empty_language() {
        let a = Nfa::new();
        assert!(a.is_lang_empty().is_none());
    }

    #[test]
    fn is_lang_empty_closes_epsilon_after_a_symbol_step() {
        // 0--a-->1, 1--eps-->2, final {2}: the final state is only reachable
        // by an epsilon move taken *after* consuming a symbol.
        let mut a = Nfa::new();
        a.add_transition(0, 7, 1);
        a.add_transition(1, EPSILON, 2);
        a.add_initial(0);
        a.add_final(2);
        let (word, path) = a.is_lang_empty().expect("language must not be empty");
        assert_eq!(word, vec![7]);
        assert_eq!(path, vec![0, 1, 2]);
    }

    #[test]
    fn trim_drops_useless_states() {
        let mut a = make(&[(0, 1, 1), (1, 1, 2), (2, 1, 3)], &[0], &[1]);
        // state 3 is reachable but not co-reachable (no path to a final state).
        a.add_state_at(3);
        a.trim();
        assert_eq!(a.num_of_states(), 2);
        // state 1's edge to the dropped state 2 must be gone, not rewritten
        // to an out-of-range target.
        for t in a.delta.transitions() {
            assert!(t.source < 2 && t.target < 2, "dangling edge {t:?} after trim");
        }
    }

    #[test]
    fn is_deterministic_checks_single_initial_and_targets() {
        let det = make(&[(0, 1, 1)], &[0], &[1]);
        assert!(det.is_deterministic());
        let non_det = make(&[(0, 1, 1), (0, 1, 2)], &[0], &[1, 2]);
        assert!(!non_det.is_deterministic());
    }

    #[test]
    fn make_complete_adds_sink_transitions() {
        let mut a = make(&[(0, 1, 1)], &[0], &[1]);
        let symbols = OrdVector::from_iter_unsorted([1, 2]);
        let sink = a.make_complete(&symbols, None);
        assert!(a.delta.contains(0, 2, sink));
        assert!(a.delta.contains(sink, 1, sink));
        assert!(a.delta.contains(sink, 2, sink));
    }

    #[test]
    fn membership_respects_epsilon_closure() {
        let mut a = Nfa::new();
        a.add_transition(0, EPSILON, 1);
        a.add_transition(1, 5, 2);
        a.add_initial(0);
        a.add_final(2);
        assert!(a.is_in_lang(&[5]));
        assert!(!a.is_in_lang(&[6]));
    }

    #[test]
    fn is_acyclic_detects_self_loop_and_cycle() {
        let with_self_loop = make(&[(0, 1, 0)], &[0], &[0]);
        assert!(!with_self_loop.is_acyclic());
        let dag = make(&[(0, 1, 1), (1, 1, 2)], &[0], &[2]);
        assert!(dag.is_acyclic());
    }
}
