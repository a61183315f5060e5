//! Node implementation for the hashed-heap trie.
//!
//! Children live in a hash map for direct lookup. The same symbols are kept in
//! a min-heap that is only read when ordered enumeration is needed. Removing a
//! child does not touch the heap; it leaves a pending-removal credit instead,
//! and the stale heap entry is discarded the next time the heap is drained.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::BinaryHeap;

use fnv::FnvHashMap;

use crate::data_structures::prefix_trie::Symbol;

/// Value stored under one child symbol.
#[derive(Debug)]
pub(crate) enum HeapEntry {
    /// A stored string ends at the owning node.
    Terminal,
    /// Continuation through a character, owning the whole subtree below it.
    Branch(HeapNode),
}

impl HeapEntry {
    fn as_node(&self) -> Option<&HeapNode> {
        match self {
            HeapEntry::Terminal => None,
            HeapEntry::Branch(node) => Some(node),
        }
    }

    fn into_node(self) -> Option<HeapNode> {
        match self {
            HeapEntry::Terminal => None,
            HeapEntry::Branch(node) => Some(node),
        }
    }
}

/// A node in the hashed-heap trie.
#[derive(Debug, Default)]
pub(crate) struct HeapNode {
    /// Number of stored strings passing through this node
    pub(crate) refs: usize,

    /// Live children keyed by symbol
    pub(crate) children: FnvHashMap<Symbol, HeapEntry>,

    /// Min-heap of child symbols, possibly holding stale entries
    pub(crate) keys: BinaryHeap<Reverse<Symbol>>,

    /// Stale heap occurrences still to be discarded, per symbol
    pub(crate) pending: FnvHashMap<Symbol, usize>,
}

impl HeapNode {
    /// Creates a new node with no children and no references.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The child reached through `c`, if any.
    pub(crate) fn child(&self, c: char) -> Option<&HeapNode> {
        self.children.get(&Symbol::from(c))?.as_node()
    }

    /// The child reached through `c`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such child; callers only descend along paths
    /// they have already verified.
    pub(crate) fn branch_mut(&mut self, c: char) -> &mut HeapNode {
        match self.children.get_mut(&Symbol::from(c)) {
            Some(HeapEntry::Branch(node)) => node,
            _ => unreachable!("no child for {c:?} on a verified path"),
        }
    }

    /// Moves the child reached through `c` out of the map, leaving its heap
    /// entry in place. Pair with [`HeapNode::restore_branch`].
    pub(crate) fn take_branch(&mut self, c: char) -> HeapNode {
        match self.children.remove(&Symbol::from(c)) {
            Some(HeapEntry::Branch(node)) => node,
            _ => unreachable!("heap entry {c:?} has neither a child nor a pending credit"),
        }
    }

    /// Puts back a child taken with [`HeapNode::take_branch`].
    pub(crate) fn restore_branch(&mut self, c: char, node: HeapNode) {
        let previous = self.children.insert(Symbol::from(c), HeapEntry::Branch(node));
        debug_assert!(previous.is_none(), "child {c:?} restored twice");
    }

    /// The child reached through `c`, created and pushed onto the heap if absent.
    pub(crate) fn child_or_insert(&mut self, c: char) -> &mut HeapNode {
        let symbol = Symbol::from(c);
        let entry = match self.children.entry(symbol) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                self.keys.push(Reverse(symbol));
                vacant.insert(HeapEntry::Branch(HeapNode::new()))
            }
        };
        match entry {
            HeapEntry::Branch(node) => node,
            HeapEntry::Terminal => unreachable!("a character key never holds the terminal marker"),
        }
    }

    /// Drops the child reached through `c` and records one pending credit for
    /// its heap entry.
    pub(crate) fn unlink(&mut self, c: char) {
        let symbol = Symbol::from(c);
        if self.children.remove(&symbol).is_some() {
            *self.pending.entry(symbol).or_insert(0) += 1;
        }
    }

    /// Returns `true` if a stored string ends here.
    pub(crate) fn has_terminal(&self) -> bool {
        self.children.contains_key(&Symbol::Terminal)
    }

    /// Adds the terminal marker to the map and the heap.
    pub(crate) fn mark_terminal(&mut self) {
        if self
            .children
            .insert(Symbol::Terminal, HeapEntry::Terminal)
            .is_none()
        {
            self.keys.push(Reverse(Symbol::Terminal));
        }
    }

    /// Removes the terminal marker, returning whether it was present.
    ///
    /// The terminal sorts before every character and is never left stale, so
    /// it is popped from the heap eagerly.
    pub(crate) fn unmark_terminal(&mut self) -> bool {
        if self.children.remove(&Symbol::Terminal).is_none() {
            return false;
        }
        let popped = self.keys.pop();
        debug_assert_eq!(popped, Some(Reverse(Symbol::Terminal)));
        true
    }

    /// Sum of pending credits at this node and below.
    pub(crate) fn pending_total(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += node.pending.values().sum::<usize>();
            stack.extend(node.children.values().filter_map(HeapEntry::as_node));
        }
        total
    }
}

impl Drop for HeapNode {
    // Subtrees are as deep as the longest stored string, so they are torn
    // down from an explicit stack instead of through nested drop calls.
    fn drop(&mut self) {
        let mut stack: Vec<HeapNode> = self
            .children
            .drain()
            .filter_map(|(_, entry)| entry.into_node())
            .collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().filter_map(|(_, entry)| entry.into_node()));
        }
    }
}
