//! Automaton-to-automaton and automaton-to-bool algorithms, one module per
//! operation family, composed from `nfa`'s structural primitives rather than
//! reaching into `Delta` directly wherever a public `Nfa` method suffices.

pub mod complement;
pub mod determinize;
pub mod epsilon;
pub mod inclusion;
pub mod minimize;
pub mod product;
pub mod reduce;
pub mod revert;
