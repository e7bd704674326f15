//! The transition relation: an indexable sequence of state-posts.
//!
//! Grounded on `original_source/include/mata/nfa/delta.hh`'s `Delta` class:
//! a flat `Vec<StatePost>` indexed by source state, with a strict
//! mutable-vs-const access duality (`get_mutable_post` grows, the const
//! index operator never does) per the design notes.

pub mod post;

pub use post::{StatePost, StatePostExt, SymbolPost};

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::ord_vector::OrdVector;
use crate::symbol::{State, Symbol};

fn empty_post() -> &'static StatePost {
    static EMPTY: OnceLock<StatePost> = OnceLock::new();
    EMPTY.get_or_init(StatePost::new)
}

/// A single transition, as yielded by the global iteration protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: State,
    pub symbol: Symbol,
    pub target: State,
}

/// The transition relation, indexed by source state.
#[derive(Debug, Clone, Default)]
pub struct Delta {
    posts: Vec<StatePost>,
}

impl Delta {
    /// An empty delta.
    pub fn new() -> Self {
        Delta { posts: Vec::new() }
    }

    /// An empty delta pre-sized to `n` state-posts.
    pub fn with_capacity(n: usize) -> Self {
        Delta { posts: vec![StatePost::new(); n] }
    }

    pub fn reserve(&mut self, n: usize) {
        self.posts.reserve(n);
    }

    /// Total number of `(source, symbol, target)` triples.
    pub fn size(&self) -> usize {
        self.posts.iter().map(|p| p.iter().map(|sp| sp.targets.len()).sum::<usize>()).sum()
    }

    /// Number of state-posts (i.e. states known to this delta).
    pub fn num_of_states(&self) -> usize {
        self.posts.len()
    }

    /// Read-only access to the post of `q`. Never grows the delta: reading
    /// past the materialised range returns a shared empty post.
    pub fn state_post(&self, q: State) -> &StatePost {
        self.posts.get(q).unwrap_or_else(|| empty_post())
    }

    /// Mutable access to the post of `q`, growing the delta to `q + 1`
    /// state-posts if necessary. This invalidates any outstanding iterator
    /// over the delta; prefer [`Delta::state_post`] when growth is not wanted.
    pub fn get_mutable_post(&mut self, q: State) -> &mut StatePost {
        if q >= self.posts.len() {
            self.posts.resize(q + 1, StatePost::new());
        }
        &mut self.posts[q]
    }

    pub fn emplace_back(&mut self) {
        self.posts.push(StatePost::new());
    }

    pub fn clear(&mut self) {
        self.posts.clear();
    }

    /// Resizes the backing vector up to at least `n` state-posts.
    pub fn increase_size(&mut self, n: usize) {
        assert!(n >= self.posts.len(), "increase_size must not shrink delta");
        self.posts.resize(n, StatePost::new());
    }

    /// Adds `(state_from, symbol, state_to)`. Idempotent.
    pub fn add(&mut self, state_from: State, symbol: Symbol, state_to: State) {
        let post = self.get_mutable_post(state_from);
        match post.find_symbol(symbol) {
            Some(_) => {
                // Reconstruct with the target inserted: StatePost/SymbolPost are
                // immutable-by-value ordered vectors, so we rebuild the one entry.
                let mut rebuilt: Vec<SymbolPost> = post.as_slice().to_vec();
                let idx = rebuilt.iter().position(|sp| sp.symbol == symbol).unwrap();
                rebuilt[idx].targets.insert(state_to);
                *post = StatePost::from_sorted(rebuilt);
            }
            None => post.insert(SymbolPost::with_target(symbol, state_to)),
        }
    }

    /// Adds transitions to every state in `states_to` from `state_from` over `symbol`
    /// (ordered-union with any existing targets for that symbol).
    pub fn add_targets(&mut self, state_from: State, symbol: Symbol, states_to: &OrdVector<State>) {
        let post = self.get_mutable_post(state_from);
        match post.find_symbol(symbol) {
            Some(existing) => {
                let merged = existing.targets.union(states_to);
                let mut rebuilt: Vec<SymbolPost> = post.as_slice().to_vec();
                let idx = rebuilt.iter().position(|sp| sp.symbol == symbol).unwrap();
                rebuilt[idx].targets = merged;
                *post = StatePost::from_sorted(rebuilt);
            }
            None => post.insert(SymbolPost::with_targets(symbol, states_to.clone())),
        }
    }

    /// Removes `(src, symb, tgt)`. Fails if the transition is absent while `src`
    /// is in range ("fails if absent" remove semantics).
    pub fn remove(&mut self, src: State, symb: Symbol, tgt: State) -> Result<()> {
        if src >= self.posts.len() {
            return Err(Error::InvalidArgument(format!("state {src} has no transitions to remove")));
        }
        let post = &mut self.posts[src];
        let Some(sp) = post.find_symbol(symb) else {
            return Err(Error::InvalidArgument(format!("no transition ({src}, {symb}, {tgt})")));
        };
        if !sp.targets.contains(&tgt) {
            return Err(Error::InvalidArgument(format!("no transition ({src}, {symb}, {tgt})")));
        }
        let mut rebuilt: Vec<SymbolPost> = post.as_slice().to_vec();
        let idx = rebuilt.iter().position(|s| s.symbol == symb).unwrap();
        rebuilt[idx].targets.remove(&tgt);
        if rebuilt[idx].targets.is_empty() {
            rebuilt.remove(idx);
        }
        *post = StatePost::from_sorted(rebuilt);
        Ok(())
    }

    pub fn contains(&self, src: State, symb: Symbol, tgt: State) -> bool {
        self.state_post(src).find_symbol(symb).is_some_and(|sp| sp.targets.contains(&tgt))
    }

    pub fn is_empty(&self) -> bool {
        self.posts.iter().all(|p| p.is_empty())
    }

    /// Appends a batch of already-built posts (used when assembling a delta
    /// state by state, e.g. during determinization).
    pub fn append(&mut self, post_vector: Vec<StatePost>) {
        self.posts.extend(post_vector);
    }

    /// Copies every post, applying a monotonic `lambda` to every target state.
    pub fn transform(&self, lambda: impl Fn(State) -> State) -> Vec<StatePost> {
        self.posts
            .iter()
            .map(|post| {
                let renamed: Vec<SymbolPost> = post
                    .iter()
                    .map(|sp| {
                        let mut targets = sp.targets.clone();
                        targets.rename(|t| lambda(*t));
                        SymbolPost::with_targets(sp.symbol, targets)
                    })
                    .collect();
                StatePost::from_iter_unsorted(renamed)
            })
            .collect()
    }

    /// Drops state-posts of non-kept states and rewrites target states through
    /// `renaming`. A move whose target is itself not kept is dropped along
    /// with it (rather than rewritten to `renaming[t] == State::MAX`), and a
    /// symbol-post left with no surviving targets is dropped entirely.
    pub fn defragment(&mut self, is_staying: &[bool], renaming: &[State]) {
        let mut new_posts = Vec::new();
        for (q, post) in self.posts.iter().enumerate() {
            if !is_staying[q] {
                continue;
            }
            let renamed: Vec<SymbolPost> = post
                .iter()
                .filter_map(|sp| {
                    let kept: Vec<State> =
                        sp.targets.iter().copied().filter(|t| is_staying[*t]).map(|t| renaming[t]).collect();
                    if kept.is_empty() {
                        None
                    } else {
                        Some(SymbolPost::with_targets(sp.symbol, OrdVector::from_iter_unsorted(kept)))
                    }
                })
                .collect();
            new_posts.push(StatePost::from_iter_unsorted(renamed));
        }
        self.posts = new_posts;
    }

    /// Every `(source, symbol, target)` triple in source-major, symbol-major,
    /// target-major order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions_from(0)
    }

    /// Same as [`Delta::transitions`], but starting at the first transition
    /// whose source is `>= q0`.
    pub fn transitions_from(&self, q0: State) -> impl Iterator<Item = Transition> + '_ {
        self.posts.iter().enumerate().skip(q0).flat_map(|(source, post)| {
            post.moves().map(move |(symbol, target)| Transition { source, symbol, target })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_mutable_post_grows() {
        let mut d = Delta::new();
        d.add(0, 1, 2);
        d.add(0, 1, 2);
        assert_eq!(d.num_of_states(), 1);
        assert!(d.contains(0, 1, 2));
        assert_eq!(d.size(), 1);
    }

    #[test]
    fn const_read_never_grows() {
        let d = Delta::new();
        assert!(d.state_post(5).is_empty());
        assert_eq!(d.num_of_states(), 0);
    }

    #[test]
    fn remove_absent_transition_errors() {
        let mut d = Delta::new();
        d.add(0, 1, 2);
        assert!(d.remove(0, 1, 3).is_err());
        assert!(d.remove(0, 1, 2).is_ok());
        assert!(!d.contains(0, 1, 2));
    }

    #[test]
    fn global_iteration_is_lexicographic() {
        let mut d = Delta::new();
        d.add(1, 5, 9);
        d.add(0, 2, 1);
        d.add(0, 2, 0);
        let ts: Vec<_> = d.transitions().map(|t| (t.source, t.symbol, t.target)).collect();
        assert_eq!(ts, vec![(0, 2, 0), (0, 2, 1), (1, 5, 9)]);
    }

    #[test]
    fn transitions_from_skips_earlier_sources() {
        let mut d = Delta::new();
        d.add(0, 1, 1);
        d.add(2, 1, 1);
        let ts: Vec<_> = d.transitions_from(1).map(|t| t.source).collect();
        assert_eq!(ts, vec![2]);
    }

    #[test]
    fn defragment_drops_and_renames() {
        let mut d = Delta::new();
        d.add(0, 1, 2);
        d.add(2, 1, 0);
        let is_staying = vec![true, false, true];
        let renaming = vec![0, usize::MAX, 1];
        d.defragment(&is_staying, &renaming);
        assert_eq!(d.num_of_states(), 2);
        assert!(d.contains(0, 1, 1));
        assert!(d.contains(1, 1, 0));
    }
}
