//! `SymbolPost` (a symbol plus its ordered target set) and `StatePost` (the
//! ordered sequence of symbol-posts for one source state).
//!
//! Grounded on `original_source/include/mata/nfa/delta.hh`'s `Move`/`Post`:
//! `Move` orders only by `symbol`, letting `Post` (here `StatePost`) reuse
//! the generic ordered-vector machinery and its `find({symbol, {}})` trick
//! for symbol lookup.

use std::cmp::Ordering;

use crate::ord_vector::OrdVector;
use crate::symbol::{State, Symbol};

/// One symbol together with its ordered set of target states. Ordered by
/// `symbol` alone so that a [`StatePost`] (an `OrdVector<SymbolPost>`) can be
/// searched by symbol without comparing target sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPost {
    pub symbol: Symbol,
    pub targets: OrdVector<State>,
}

impl SymbolPost {
    /// A symbol-post with no targets yet.
    pub fn new(symbol: Symbol) -> Self {
        SymbolPost { symbol, targets: OrdVector::new() }
    }

    /// A symbol-post with a single target.
    pub fn with_target(symbol: Symbol, target: State) -> Self {
        let mut targets = OrdVector::new();
        targets.insert(target);
        SymbolPost { symbol, targets }
    }

    /// A symbol-post with a pre-built target set.
    pub fn with_targets(symbol: Symbol, targets: OrdVector<State>) -> Self {
        SymbolPost { symbol, targets }
    }

    /// A dummy symbol-post usable only as a search key (empty targets), matching the
    /// reference implementation's `find({symbol, {}})` idiom.
    fn search_key(symbol: Symbol) -> Self {
        SymbolPost { symbol, targets: OrdVector::new() }
    }
}

impl PartialOrd for SymbolPost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolPost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

/// The ordered sequence of symbol-posts belonging to one source state.
pub type StatePost = OrdVector<SymbolPost>;

/// Extension methods on [`StatePost`] for symbol-keyed lookup and the three
/// iteration protocols.
pub trait StatePostExt {
    fn find_symbol(&self, symbol: Symbol) -> Option<&SymbolPost>;
    fn moves(&self) -> Box<dyn Iterator<Item = (Symbol, State)> + '_>;
    fn epsilon_moves(&self) -> Box<dyn Iterator<Item = (Symbol, State)> + '_>;
    fn alphabet_symbol_moves(&self) -> Box<dyn Iterator<Item = (Symbol, State)> + '_>;
    fn moves_symbols(&self, upper: Symbol) -> Box<dyn Iterator<Item = (Symbol, State)> + '_>;
}

impl StatePostExt for StatePost {
    fn find_symbol(&self, symbol: Symbol) -> Option<&SymbolPost> {
        self.find(&SymbolPost::search_key(symbol))
    }

    fn moves(&self) -> Box<dyn Iterator<Item = (Symbol, State)> + '_> {
        Box::new(self.iter().flat_map(|sp| sp.targets.iter().map(move |&t| (sp.symbol, t))))
    }

    fn epsilon_moves(&self) -> Box<dyn Iterator<Item = (Symbol, State)> + '_> {
        Box::new(
            self.iter()
                .filter(|sp| sp.symbol == crate::symbol::EPSILON)
                .flat_map(|sp| sp.targets.iter().map(move |&t| (sp.symbol, t))),
        )
    }

    fn alphabet_symbol_moves(&self) -> Box<dyn Iterator<Item = (Symbol, State)> + '_> {
        Box::new(
            self.iter()
                .filter(|sp| sp.symbol != crate::symbol::EPSILON)
                .flat_map(|sp| sp.targets.iter().map(move |&t| (sp.symbol, t))),
        )
    }

    fn moves_symbols(&self, upper: Symbol) -> Box<dyn Iterator<Item = (Symbol, State)> + '_> {
        Box::new(
            self.iter()
                .take_while(move |sp| sp.symbol < upper)
                .flat_map(|sp| sp.targets.iter().map(move |&t| (sp.symbol, t))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(entries: &[(Symbol, &[State])]) -> StatePost {
        OrdVector::from_iter_unsorted(
            entries
                .iter()
                .map(|&(sym, tgts)| SymbolPost::with_targets(sym, OrdVector::from_iter_unsorted(tgts.iter().copied()))),
        )
    }

    #[test]
    fn find_symbol_uses_symbol_only_ordering() {
        let p = post(&[(1, &[5, 6]), (3, &[7])]);
        assert_eq!(p.find_symbol(3).unwrap().targets.as_slice(), &[7]);
        assert!(p.find_symbol(2).is_none());
    }

    #[test]
    fn moves_are_lexicographic() {
        let p = post(&[(3, &[7]), (1, &[6, 5])]);
        let moves: Vec<_> = p.moves().collect();
        assert_eq!(moves, vec![(1, 5), (1, 6), (3, 7)]);
    }

    #[test]
    fn epsilon_vs_alphabet_split() {
        let p = post(&[(2, &[1]), (crate::symbol::EPSILON, &[9])]);
        assert_eq!(p.epsilon_moves().collect::<Vec<_>>(), vec![(crate::symbol::EPSILON, 9)]);
        assert_eq!(p.alphabet_symbol_moves().collect::<Vec<_>>(), vec![(2, 1)]);
    }

    #[test]
    fn moves_symbols_stops_before_upper() {
        let p = post(&[(1, &[1]), (2, &[2]), (5, &[5])]);
        assert_eq!(p.moves_symbols(5).collect::<Vec<_>>(), vec![(1, 1), (2, 2)]);
    }
}
