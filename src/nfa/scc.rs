//! A single Tarjan strongly-connected-components traversal, parameterised by
//! callbacks, shared by `is_acyclic` and `get_useful_states`:
//! "rather than hard-coding... against bespoke DFS routines, parameterise
//! one Tarjan traversal by a callback structure").

use crate::symbol::State;

/// Hooks fired during a [`tarjan_scc`] traversal.
pub struct TarjanCallbacks<'a> {
    pub on_state_discover: &'a mut dyn FnMut(State),
    pub on_scc_discover: &'a mut dyn FnMut(&[State]),
    pub on_successor: &'a mut dyn FnMut(State, State),
}

/// Iterative Tarjan SCC following `successors(state)`, started from each of
/// `roots` in turn (skipping any already visited from an earlier root). SCCs
/// are reported in reverse topological order (sinks first), as they finish.
///
/// Passing `0..num_states` as `roots` visits every state and yields full SCC
/// decomposition (what [`super::Nfa::is_acyclic`] needs). Passing a smaller
/// root set (e.g. the automaton's initial states) instead turns this into a
/// rooted reachability traversal: `on_state_discover` then fires exactly for
/// the states reachable from `roots`, which is what
/// [`super::Nfa::get_reachable_states`] and [`super::Nfa::get_co_reachable_states`]
/// use it for, via `on_state_discover` alone.
pub fn tarjan_scc(
    num_states: usize,
    roots: impl IntoIterator<Item = State>,
    successors: impl Fn(State) -> Vec<State>,
    callbacks: &mut TarjanCallbacks,
) {
    let mut index_counter = 0usize;
    let mut indices: Vec<Option<usize>> = vec![None; num_states];
    let mut lowlink = vec![0usize; num_states];
    let mut on_stack = vec![false; num_states];
    let mut stack: Vec<State> = Vec::new();

    for start in roots {
        if indices[start].is_some() {
            continue;
        }
        let mut frame_stack: Vec<(State, usize, Vec<State>)> = Vec::new();
        indices[start] = Some(index_counter);
        lowlink[start] = index_counter;
        index_counter += 1;
        (callbacks.on_state_discover)(start);
        stack.push(start);
        on_stack[start] = true;
        frame_stack.push((start, 0, successors(start)));

        while !frame_stack.is_empty() {
            let len = frame_stack.len();
            let (v, has_next, maybe_w) = {
                let top = &mut frame_stack[len - 1];
                if top.1 < top.2.len() {
                    let w = top.2[top.1];
                    top.1 += 1;
                    (top.0, true, Some(w))
                } else {
                    (top.0, false, None)
                }
            };

            if has_next {
                let w = maybe_w.unwrap();
                (callbacks.on_successor)(v, w);
                if indices[w].is_none() {
                    indices[w] = Some(index_counter);
                    lowlink[w] = index_counter;
                    index_counter += 1;
                    (callbacks.on_state_discover)(w);
                    stack.push(w);
                    on_stack[w] = true;
                    let w_succs = successors(w);
                    frame_stack.push((w, 0, w_succs));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(indices[w].unwrap());
                }
            } else {
                frame_stack.pop();
                if let Some(parent) = frame_stack.last() {
                    let parent_v = parent.0;
                    lowlink[parent_v] = lowlink[parent_v].min(lowlink[v]);
                }
                if lowlink[v] == indices[v].unwrap() {
                    let mut scc = Vec::new();
                    loop {
                        let w = stack.pop().unwrap();
                        on_stack[w] = false;
                        scc.push(w);
                        if w == v {
                            break;
                        }
                    }
                    (callbacks.on_scc_discover)(&scc);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_simple_cycle() {
        // 0 -> 1 -> 2 -> 0, plus 2 -> 3 (sink).
        let succ = |s: State| -> Vec<State> {
            match s {
                0 => vec![1],
                1 => vec![2],
                2 => vec![0, 3],
                _ => vec![],
            }
        };
        let mut sccs: Vec<Vec<State>> = Vec::new();
        let mut on_scc = |scc: &[State]| sccs.push(scc.to_vec());
        let mut noop_state = |_: State| {};
        let mut noop_edge = |_: State, _: State| {};
        let mut cb = TarjanCallbacks {
            on_state_discover: &mut noop_state,
            on_scc_discover: &mut on_scc,
            on_successor: &mut noop_edge,
        };
        tarjan_scc(4, 0..4, succ, &mut cb);
        let mut sizes: Vec<usize> = sccs.iter().map(|s| s.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 3]);
    }

    #[test]
    fn a_smaller_root_set_yields_rooted_reachability() {
        // 0 -> 1, 2 -> 1 (2 is unreachable from root 0).
        let succ = |s: State| -> Vec<State> {
            match s {
                0 => vec![1],
                2 => vec![1],
                _ => vec![],
            }
        };
        let mut seen = vec![false; 3];
        let mut on_state = |q: State| seen[q] = true;
        let mut noop_scc = |_: &[State]| {};
        let mut noop_edge = |_: State, _: State| {};
        let mut cb = TarjanCallbacks { on_state_discover: &mut on_state, on_scc_discover: &mut noop_scc, on_successor: &mut noop_edge };
        tarjan_scc(3, [0], succ, &mut cb);
        assert_eq!(seen, vec![true, true, false]);
    }
}
