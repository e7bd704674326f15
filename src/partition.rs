//! A refinable ordered partition of `{0..N-1}` supporting simultaneous,
//! O(N)-total block splits while remembering ancestor blocks as an implicit
//! tree of nodes.
//!
//! Grounded on `original_source/include/mata/utils/partition.hh` and
//! `src/partition.cc`: three parallel arrays — `block_items` (state plus
//! owning block, grouped contiguously per block), `blocks` (each naming its
//! current node) and `nodes` (each naming a `[first,last]` range over
//! `block_items`) — plus a `states` index for O(1) state-to-block-item
//! lookup.

use crate::symbol::State;

pub type StateBlock = Vec<State>;
pub type StateBlocks = Vec<StateBlock>;

/// One entry of the flat state array: a state together with its owning block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockItem {
    pub state: State,
    pub block_idx: usize,
}

/// A current (or formerly current) partition class, naming the node that
/// describes its `[first,last]` range over block-items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub node_idx: usize,
}

/// A contiguous `[first,last]` range over `block_items`, corresponding to one
/// block at some point in the partition's history (current or ancestor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub first: usize,
    pub last: usize,
}

/// Describes one block that was actually split by a call to [`Partition::split_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPair {
    /// Index of the block that keeps the original identity (contains the old representative).
    pub former: usize,
    /// Index of the freshly allocated block.
    pub created: usize,
    /// Index of the ancestor node that both new nodes now descend from.
    pub old_node_idx: usize,
}

/// A refinable partition over `{0..num_of_states-1}`.
pub struct Partition {
    /// `states[s]` is the index into `block_items` for state `s`.
    states: Vec<usize>,
    block_items: Vec<BlockItem>,
    blocks: Vec<Block>,
    nodes: Vec<Node>,
}

impl Partition {
    /// Builds a partition over `{0..num_of_states-1}`.
    ///
    /// `initial`, if non-empty, assigns states to blocks in the given grouping;
    /// any state not mentioned is collected into one extra trailing block.
    /// Duplicate mentions of the same state across the initial grouping are
    /// silently skipped (only the first occurrence counts).
    pub fn new(num_of_states: usize, initial: StateBlocks) -> Self {
        let mut seen = vec![false; num_of_states];
        let mut grouping: StateBlocks = Vec::new();
        for block in initial {
            let mut filtered = Vec::with_capacity(block.len());
            for s in block {
                assert!(s < num_of_states, "state out of range in initial partition");
                if !seen[s] {
                    seen[s] = true;
                    filtered.push(s);
                }
            }
            if !filtered.is_empty() {
                grouping.push(filtered);
            }
        }
        let leftover: StateBlock = (0..num_of_states).filter(|&s| !seen[s]).collect();
        if !leftover.is_empty() {
            grouping.push(leftover);
        }
        if grouping.is_empty() && num_of_states > 0 {
            grouping.push((0..num_of_states).collect());
        }

        let mut states = vec![0usize; num_of_states];
        let mut block_items = Vec::with_capacity(num_of_states);
        let mut blocks = Vec::with_capacity(grouping.len());
        let mut nodes = Vec::with_capacity(2 * num_of_states.max(1) - 1);

        for (block_idx, group) in grouping.into_iter().enumerate() {
            let first = block_items.len();
            for s in group {
                states[s] = block_items.len();
                block_items.push(BlockItem { state: s, block_idx });
            }
            let last = block_items.len() - 1;
            nodes.push(Node { first, last });
            blocks.push(Block { node_idx: nodes.len() - 1 });
        }

        Partition { states, block_items, blocks, nodes }
    }

    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }
    pub fn num_of_block_items(&self) -> usize {
        self.block_items.len()
    }
    pub fn num_of_blocks(&self) -> usize {
        self.blocks.len()
    }
    pub fn num_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_block_item(&self, block_item_idx: usize) -> &BlockItem {
        &self.block_items[block_item_idx]
    }
    pub fn get_block(&self, block_idx: usize) -> &Block {
        &self.blocks[block_idx]
    }
    pub fn get_node(&self, node_idx: usize) -> &Node {
        &self.nodes[node_idx]
    }

    pub fn get_block_item_idx_from_state(&self, state: State) -> usize {
        self.states[state]
    }
    pub fn get_block_idx_from_state(&self, state: State) -> usize {
        self.block_items[self.states[state]].block_idx
    }
    pub fn get_node_idx_from_block_item_idx(&self, block_item_idx: usize) -> usize {
        self.blocks[self.block_items[block_item_idx].block_idx].node_idx
    }
    pub fn get_node_idx_from_state(&self, state: State) -> usize {
        self.get_node_idx_from_block_item_idx(self.states[state])
    }
    pub fn get_node_idx_from_block_idx(&self, block_idx: usize) -> usize {
        self.blocks[block_idx].node_idx
    }
    pub fn get_repr_idx_from_node_idx(&self, node_idx: usize) -> usize {
        self.block_items[self.nodes[node_idx].first].state
    }
    pub fn get_repr_idx_from_block_idx(&self, block_idx: usize) -> usize {
        self.get_repr_idx_from_node_idx(self.get_node_idx_from_block_idx(block_idx))
    }

    /// Whether `first` and `second` currently share a block.
    pub fn in_same_block(&self, first: State, second: State) -> bool {
        self.get_block_idx_from_state(first) == self.get_block_idx_from_state(second)
    }

    /// Whether every state in `states` currently shares one block.
    pub fn in_same_block_all(&self, states: &[State]) -> bool {
        match states.first() {
            None => true,
            Some(&s0) => {
                let b0 = self.get_block_idx_from_state(s0);
                states.iter().all(|&s| self.get_block_idx_from_state(s) == b0)
            }
        }
    }

    /// All states currently sharing `state`'s block.
    pub fn states_in_same_block(&self, state: State) -> Vec<State> {
        let node = self.nodes[self.get_node_idx_from_state(state)];
        (node.first..=node.last).map(|i| self.block_items[i].state).collect()
    }

    /// Splits every block simultaneously: each block B becomes `B ∩ marked` and
    /// `B \ marked`, leaving blocks that are entirely (or not at all) marked
    /// untouched. Returns one [`SplitPair`] per block that actually split.
    ///
    /// Runs in `O(states.len() + marked.len())`: only blocks touched by a
    /// marked state are ever inspected, and each is processed in time
    /// proportional to its own size.
    pub fn split_blocks(&mut self, marked: &[State]) -> Vec<SplitPair> {
        let n = self.states.len();
        let mut mark_flag = vec![false; n];
        for &s in marked {
            assert!(s < n, "state {s} out of range in partition split");
            assert!(!mark_flag[s], "state {s} marked twice in partition split");
            mark_flag[s] = true;
        }

        // Touch each affected block exactly once, preserving first-seen order
        // so splits are applied deterministically.
        let mut touched_order: Vec<usize> = Vec::new();
        let mut marked_count: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();
        for &s in marked {
            let b = self.get_block_idx_from_state(s);
            let entry = marked_count.entry(b).or_insert_with(|| {
                touched_order.push(b);
                0
            });
            *entry += 1;
        }

        let mut result = Vec::new();
        for block_idx in touched_order {
            let count = marked_count[&block_idx];
            let node_idx = self.blocks[block_idx].node_idx;
            let Node { first, last } = self.nodes[node_idx];
            let block_size = last - first + 1;
            if count == block_size {
                continue;
            }

            let rep_marked = mark_flag[self.block_items[first].state];
            let mut same_side = Vec::with_capacity(block_size);
            let mut other_side = Vec::with_capacity(block_size);
            for idx in first..=last {
                let bi = self.block_items[idx];
                if mark_flag[bi.state] == rep_marked {
                    same_side.push(bi);
                } else {
                    other_side.push(bi);
                }
            }
            let split_point = first + same_side.len();
            for (offset, bi) in same_side.into_iter().chain(other_side).enumerate() {
                let pos = first + offset;
                self.states[bi.state] = pos;
                self.block_items[pos] = bi;
            }

            let former_node_idx = self.nodes.len();
            self.nodes.push(Node { first, last: split_point - 1 });
            self.blocks[block_idx].node_idx = former_node_idx;

            let created_node_idx = self.nodes.len();
            self.nodes.push(Node { first: split_point, last });
            let created_block_idx = self.blocks.len();
            self.blocks.push(Block { node_idx: created_node_idx });
            for idx in split_point..=last {
                self.block_items[idx].block_idx = created_block_idx;
            }

            result.push(SplitPair { former: block_idx, created: created_block_idx, old_node_idx: node_idx });
        }
        result
    }

    /// Converts the current partition back into a vector of state groups.
    pub fn partition(&self) -> StateBlocks {
        self.blocks
            .iter()
            .map(|b| {
                let node = self.nodes[b.node_idx];
                (node.first..=node.last).map(|i| self.block_items[i].state).collect()
            })
            .collect()
    }
}
