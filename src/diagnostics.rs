//! Diagnostics configuration and a Graphviz DOT writer.
//!
//! Grounded on a design note folding ad-hoc debug printing into an
//! explicit diagnostics configuration, emitted through the `log` crate
//! (facade only — callers pick the backend, as usual for a library crate)
//! rather than writing to stdout directly.

use std::fmt::Write as _;

use log::Level;

use crate::nfa::Nfa;

/// How verbosely an operation reports its own progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub level: Level,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics { level: Level::Warn }
    }
}

impl Diagnostics {
    pub fn new(level: Level) -> Self {
        Diagnostics { level }
    }

    pub fn silent() -> Self {
        Diagnostics { level: Level::Error }
    }

    /// Emits `message` at this configuration's level via the `log` facade.
    pub fn emit(&self, message: &str) {
        log::log!(self.level, "{message}");
    }
}

/// Renders `nfa` as a Graphviz DOT digraph: double circles for final states,
/// an unlabeled arrow into each initial state.
pub fn to_dot(nfa: &Nfa, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {name} {{");
    let _ = writeln!(out, "  rankdir=LR;");
    for q in 0..nfa.num_of_states() {
        let shape = if nfa.final_states.contains(q) { "doublecircle" } else { "circle" };
        let _ = writeln!(out, "  {q} [shape={shape}];");
    }
    for (i, q) in nfa.initial.iter().enumerate() {
        let _ = writeln!(out, "  init{i} [shape=point];");
        let _ = writeln!(out, "  init{i} -> {q};");
    }
    for t in nfa.delta.transitions() {
        let label = if t.symbol == crate::symbol::EPSILON { "\u{3b5}".to_string() } else { t.symbol.to_string() };
        let _ = writeln!(out, "  {} -> {} [label=\"{}\"];", t.source, t.target, label);
    }
    let _ = writeln!(out, "}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_output_marks_final_states_as_double_circles() {
        let mut a = Nfa::new();
        a.add_transition(0, 1, 1);
        a.add_initial(0);
        a.add_final(1);
        let dot = to_dot(&a, "g");
        assert!(dot.contains("1 [shape=doublecircle]"));
        assert!(dot.contains("0 [shape=circle]"));
        assert!(dot.contains("0 -> 1"));
    }

    #[test]
    fn diagnostics_default_is_warn_level() {
        assert_eq!(Diagnostics::default().level, Level::Warn);
    }
}
