//! The `.mata` textual format: one automaton per file, a header line
//! declaring the kind, then one declaration per line for states, initial and
//! final markers, an optional level block, and transitions.
//!
//! Grounded on the "Textual serialisation" design (writer side only; the
//! reader here exists solely so the crate's own round-trip tests do not
//! depend on an external `.mata` file).

use crate::error::{Error, Result};
use crate::nfa::lvlfa::Lvlfa;
use crate::nfa::Nfa;
use crate::symbol::{Symbol, EPSILON};

const HEADER: &str = "@NFA-explicit";
const LVLFA_HEADER: &str = "@LVLFA-explicit";

/// Writes `nfa` in `.mata` textual form.
pub fn to_mata_string(nfa: &Nfa) -> String {
    let mut lines = vec![HEADER.to_string()];
    push_body(nfa, &mut lines);
    lines.join("\n")
}

/// Writes `lvlfa` in `.mata` textual form, including its `%Levels` block and
/// `%LevelsCnt` declaration.
pub fn to_mata_string_lvlfa(lvlfa: &Lvlfa) -> String {
    let mut lines = vec![LVLFA_HEADER.to_string()];
    lines.push(format!("%LevelsCnt {}", lvlfa.levels_cnt()));
    for q in 0..lvlfa.nfa.num_of_states() {
        lines.push(format!("%Levels q{}:{}", q, lvlfa.level_of(q)));
    }
    push_body(&lvlfa.nfa, &mut lines);
    lines.join("\n")
}

fn push_body(nfa: &Nfa, lines: &mut Vec<String>) {
    for q in nfa.initial.iter() {
        lines.push(format!("%Initial q{q}"));
    }
    for q in nfa.final_states.iter() {
        lines.push(format!("%Final q{q}"));
    }
    for t in nfa.delta.transitions() {
        lines.push(format!("q{} {} q{}", t.source, symbol_to_token(t.symbol), t.target));
    }
}

fn symbol_to_token(sym: Symbol) -> String {
    if sym == EPSILON {
        "<eps>".to_string()
    } else {
        format!("a{sym}")
    }
}

fn token_to_symbol(tok: &str) -> Result<Symbol> {
    if tok == "<eps>" {
        return Ok(EPSILON);
    }
    tok.strip_prefix('a')
        .and_then(|rest| rest.parse::<Symbol>().ok())
        .ok_or_else(|| Error::ParseFailure(format!("malformed symbol token `{tok}`")))
}

fn parse_state(tok: &str) -> Result<usize> {
    tok.strip_prefix('q')
        .and_then(|rest| rest.parse::<usize>().ok())
        .ok_or_else(|| Error::ParseFailure(format!("malformed state token `{tok}`")))
}

/// Parses the textual form written by [`to_mata_string`]. Only understands
/// this crate's own writer output — not a general `.mata` parser.
pub fn from_mata_string(text: &str) -> Result<Nfa> {
    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| Error::ParseFailure("empty input".into()))?;
    if header.trim() != HEADER {
        return Err(Error::ParseFailure(format!("unrecognised header `{header}`")));
    }

    let mut nfa = Nfa::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("%Initial ") {
            nfa.add_initial(parse_state(rest.trim())?);
        } else if let Some(rest) = line.strip_prefix("%Final ") {
            nfa.add_final(parse_state(rest.trim())?);
        } else {
            parse_transition_line(line, &mut |src, sym, tgt| nfa.add_transition(src, sym, tgt))?;
        }
    }
    Ok(nfa)
}

/// Parses the textual form written by [`to_mata_string_lvlfa`].
pub fn from_mata_string_lvlfa(text: &str) -> Result<Lvlfa> {
    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| Error::ParseFailure("empty input".into()))?;
    if header.trim() != LVLFA_HEADER {
        return Err(Error::ParseFailure(format!("unrecognised header `{header}`")));
    }

    let mut levels_cnt = 1usize;
    let mut level_assignments: Vec<(usize, crate::symbol::Level)> = Vec::new();
    let mut lvlfa = Lvlfa::new(1);
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("%LevelsCnt ") {
            levels_cnt = rest.trim().parse().map_err(|_| Error::ParseFailure(format!("malformed line `{line}`")))?;
        } else if let Some(rest) = line.strip_prefix("%Levels ") {
            let (q_tok, lvl_tok) =
                rest.trim().split_once(':').ok_or_else(|| Error::ParseFailure(format!("malformed line `{line}`")))?;
            let level: crate::symbol::Level =
                lvl_tok.parse().map_err(|_| Error::ParseFailure(format!("malformed line `{line}`")))?;
            level_assignments.push((parse_state(q_tok)?, level));
        } else if let Some(rest) = line.strip_prefix("%Initial ") {
            lvlfa.add_initial(parse_state(rest.trim())?);
        } else if let Some(rest) = line.strip_prefix("%Final ") {
            lvlfa.add_final(parse_state(rest.trim())?);
        } else {
            parse_transition_line(line, &mut |src, sym, tgt| lvlfa.add_transition(src, sym, tgt))?;
        }
    }

    if levels_cnt > lvlfa.levels_cnt() {
        lvlfa = rebuild_with_levels_cnt(lvlfa, levels_cnt);
    }
    for (q, level) in level_assignments {
        lvlfa.set_level(q, level);
    }
    Ok(lvlfa)
}

/// `Lvlfa::levels_cnt` is fixed at construction, but the level block is only
/// known once the whole file is read; rebuilds the automaton read so far
/// under the file's declared `levels_cnt`.
fn rebuild_with_levels_cnt(old: Lvlfa, levels_cnt: usize) -> Lvlfa {
    let mut rebuilt = Lvlfa::new(levels_cnt);
    for t in old.nfa.delta.transitions() {
        rebuilt.add_transition(t.source, t.symbol, t.target);
    }
    for q in old.nfa.initial.iter() {
        rebuilt.add_initial(q);
    }
    for q in old.nfa.final_states.iter() {
        rebuilt.add_final(q);
    }
    rebuilt
}

fn parse_transition_line(line: &str, add: &mut impl FnMut(usize, Symbol, usize)) -> Result<()> {
    let mut parts = line.split_whitespace();
    let src = parts.next().ok_or_else(|| Error::ParseFailure(format!("malformed line `{line}`")))?;
    let sym = parts.next().ok_or_else(|| Error::ParseFailure(format!("malformed line `{line}`")))?;
    let tgt = parts.next().ok_or_else(|| Error::ParseFailure(format!("malformed line `{line}`")))?;
    if parts.next().is_some() {
        return Err(Error::ParseFailure(format!("malformed line `{line}`")));
    }
    add(parse_state(src)?, token_to_symbol(sym)?, parse_state(tgt)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_small_automaton() {
        let mut a = Nfa::new();
        a.add_transition(0, 5, 1);
        a.add_transition(1, EPSILON, 2);
        a.add_initial(0);
        a.add_final(2);

        let text = to_mata_string(&a);
        let back = from_mata_string(&text).unwrap();

        assert_eq!(back.initial.iter().collect::<Vec<_>>(), a.initial.iter().collect::<Vec<_>>());
        assert_eq!(back.final_states.iter().collect::<Vec<_>>(), a.final_states.iter().collect::<Vec<_>>());
        assert!(back.delta.contains(0, 5, 1));
        assert!(back.delta.contains(1, EPSILON, 2));
    }

    #[test]
    fn rejects_a_bad_header() {
        assert!(from_mata_string("not a header\n").is_err());
    }

    #[test]
    fn writer_emits_the_declared_header() {
        let a = Nfa::new();
        assert!(to_mata_string(&a).starts_with(HEADER));
    }

    #[test]
    fn round_trips_an_lvlfa_with_its_level_block() {
        let mut a = Lvlfa::new(3);
        a.add_state_with_level(0, 0);
        a.add_state_with_level(1, 1);
        a.add_state_with_level(2, 2);
        a.add_transition(0, 7, 1);
        a.add_transition(1, 7, 2);
        a.add_initial(0);
        a.add_final(2);

        let text = to_mata_string_lvlfa(&a);
        assert!(text.starts_with(LVLFA_HEADER));
        let back = from_mata_string_lvlfa(&text).unwrap();

        assert_eq!(back.levels_cnt(), 3);
        assert_eq!(back.level_of(0), 0);
        assert_eq!(back.level_of(1), 1);
        assert_eq!(back.level_of(2), 2);
        assert!(back.nfa.delta.contains(0, 7, 1));
        assert!(back.nfa.delta.contains(1, 7, 2));
        assert!(back.nfa.initial.contains(0));
        assert!(back.nfa.final_states.contains(2));
    }

    #[test]
    fn lvlfa_reader_rejects_the_plain_nfa_header() {
        assert!(from_mata_string_lvlfa(HEADER).is_err());
    }
}
