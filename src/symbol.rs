//! State, symbol and level aliases plus the reserved sentinel values.

/// A state of an automaton. States are dense, zero-based identifiers.
pub type State = usize;

/// A symbol labelling a transition.
pub type Symbol = usize;

/// A level annotation on an LVLFA state.
pub type Level = usize;

/// A word over [`Symbol`]s.
pub type Word = Vec<Symbol>;

/// The maximum representable symbol value, reserved for epsilon transitions.
pub const EPSILON: Symbol = Symbol::MAX;

/// `EPSILON - 1`, reserved by LVLFA for a "don't care" level match.
pub const DONT_CARE: Symbol = EPSILON - 1;

/// Fixed sentinel symbols emitted by the regex front-end for zero-width assertions,
/// chosen to sit well above any alphabet that a realistic caller would use, but
/// well below [`EPSILON`] so they do not collide with it.
pub mod empty_width {
    use super::Symbol;

    /// `^` — beginning of line/text.
    pub const BEGIN_LINE: Symbol = 300;
    /// `$` — end of line/text.
    pub const END_LINE: Symbol = 301;
    /// `\A` — beginning of text.
    pub const BEGIN_TEXT: Symbol = 302;
    /// `\z` — end of text.
    pub const END_TEXT: Symbol = 303;
    /// `\b` — word boundary.
    pub const WORD_BOUNDARY: Symbol = 304;
    /// `\B` — non-word-boundary.
    pub const NOT_WORD_BOUNDARY: Symbol = 305;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn don_t_care_is_one_below_epsilon() {
        assert_eq!(DONT_CARE, EPSILON - 1);
    }

    #[test]
    fn empty_width_sentinels_are_distinct_and_below_epsilon() {
        let values = [
            empty_width::BEGIN_LINE,
            empty_width::END_LINE,
            empty_width::BEGIN_TEXT,
            empty_width::END_TEXT,
            empty_width::WORD_BOUNDARY,
            empty_width::NOT_WORD_BOUNDARY,
        ];
        for &v in &values {
            assert!(v < DONT_CARE);
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), values.len());
    }
}
