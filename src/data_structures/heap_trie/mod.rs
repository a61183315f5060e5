// Copyright (c) 2025 Lexi Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hashed-Heap Trie Implementation
//!
//! Each node maps symbols to children through an FNV hash map, so lookups do
//! not depend on the number of siblings. Ordering is recovered on demand from
//! a per-node min-heap holding the same symbols.
//!
//! # Lazy deletion
//!
//! When a child is pruned, `delete` removes it from the map and bumps a
//! pending-removal credit at the parent instead of searching the heap. The
//! next `sort` that drains that parent's heap discards one stale occurrence
//! per credit, then stores the surviving symbols back in the order they were
//! popped. That sequence is ascending, which already satisfies the heap
//! property, so rebuilding costs no sift work.
//!
//! Credits are only ever needed at the immediate parent: once a child leaves
//! the map, nothing below it is reachable anymore.
//!
//! # Complexity
//!
//! With `m` the key length and `|c|` the alphabet size:
//!
//! * `insert`: O(m·log|c|)
//! * `delete`: O(m + log|c|)
//! * `search`: O(m)
//! * `sort`: O(N·(|t| + log|c|)) for N matches with longest remaining suffix |t|

mod node;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use fnv::FnvHashMap;
use tracing::{debug, trace};

use crate::data_structures::prefix_trie::{
    audit_after_mutation, PrefixTrie, Symbol, TrieBackend, TrieConfig, TrieError, TrieResult,
};
use node::{HeapEntry, HeapNode};

/// Prefix trie whose child sets are hash maps with a lazily pruned ordering heap.
///
/// # Examples
///
/// ```
/// use lexi_trie_lib::data_structures::heap_trie::HeapTrie;
///
/// let mut trie: HeapTrie = ["ab", "ac"].into_iter().collect();
/// trie.delete("ab").unwrap();
/// assert_eq!(trie.pending_removals(), 1);
///
/// assert_eq!(trie.sort("a"), vec!["ac"]);
/// assert_eq!(trie.pending_removals(), 0);
/// ```
pub struct HeapTrie {
    /// The root node; its own `refs` is never consulted
    root: HeapNode,

    /// Number of stored strings
    len: usize,

    /// Configuration options
    config: TrieConfig,
}

impl HeapTrie {
    /// Creates a new empty `HeapTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::new().with_backend(TrieBackend::HashedHeap))
    }

    /// Creates a new empty `HeapTrie` with the specified configuration.
    ///
    /// The `backend` field of `config` is ignored.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            root: HeapNode::new(),
            len: 0,
            config,
        }
    }

    fn find(&self, prefix: &str) -> Option<&HeapNode> {
        let mut node = &self.root;
        for c in prefix.chars() {
            node = node.child(c)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, prefix: &str) -> Option<&mut HeapNode> {
        let mut node = &mut self.root;
        for c in prefix.chars() {
            node = match node.children.get_mut(&Symbol::from(c)) {
                Some(HeapEntry::Branch(next)) => next,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Returns `true` if `key` is stored.
    pub fn search(&self, key: &str) -> bool {
        self.find(key).map_or(false, HeapNode::has_terminal)
    }

    /// Stores `key`. Storing a key twice has no further effect.
    pub fn insert(&mut self, key: &str) {
        if self.search(key) {
            trace!(key, "Insert skipped, string already present");
            return;
        }

        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.child_or_insert(c);
            node.refs += 1;
        }
        node.mark_terminal();
        self.len += 1;

        debug!(key, len = self.len, "Inserted string");
        audit_after_mutation(&*self, &self.config);
    }

    /// Removes `key`.
    ///
    /// A child whose reference count reaches zero is dropped from its parent's
    /// map together with its subtree; its heap entry stays behind with a
    /// pending credit until the next `sort` reaches the parent.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::NotFound`] without touching the trie if `key` is
    /// not stored.
    pub fn delete(&mut self, key: &str) -> TrieResult<()> {
        if !self.search(key) {
            return Err(TrieError::NotFound(key.to_string()));
        }
        self.len -= 1;

        let mut node = &mut self.root;
        let mut pruned = false;
        for c in key.chars() {
            let child = node.branch_mut(c);
            child.refs -= 1;
            if child.refs == 0 {
                node.unlink(c);
                pruned = true;
                break;
            }
            node = node.branch_mut(c);
        }
        if !pruned {
            node.unmark_terminal();
        }

        debug!(key, pruned, len = self.len, "Deleted string");
        audit_after_mutation(&*self, &self.config);
        Ok(())
    }

    /// All stored strings starting with `prefix`, in ascending order.
    ///
    /// Takes `&mut self` because every heap drained along the way is purged of
    /// stale entries.
    pub fn sort(&mut self, prefix: &str) -> Vec<String> {
        let mut strings = Vec::new();
        if let Some(slot) = self.find_mut(prefix) {
            let mut buffer = prefix.to_string();
            let start = std::mem::take(slot);
            *slot = Self::collect(start, &mut buffer, &mut strings);
        }
        strings
    }

    /// Drains heaps depth first and hands `start` back with every visited heap
    /// rebuilt.
    ///
    /// The node being drained is owned by its frame: it is taken out of its
    /// parent's map on the way down and restored on the way up.
    fn collect(start: HeapNode, buffer: &mut String, strings: &mut Vec<String>) -> HeapNode {
        let mut current = Drain::new(start);
        let mut parents: Vec<(Drain, char)> = Vec::new();
        loop {
            let Some(Reverse(symbol)) = current.node.keys.pop() else {
                let node = current.finish();
                let Some((parent, c)) = parents.pop() else {
                    return node;
                };
                current = parent;
                current.node.restore_branch(c, node);
                buffer.pop();
                continue;
            };

            if current.discard_stale(symbol) {
                trace!(%symbol, "Discarded stale heap entry");
                continue;
            }
            current.kept.push(Reverse(symbol));

            match symbol.as_char() {
                None if current.node.has_terminal() => strings.push(buffer.clone()),
                None => unreachable!("terminal heap entry without a terminal marker"),
                Some(c) => {
                    let child = current.node.take_branch(c);
                    buffer.push(c);
                    parents.push((std::mem::replace(&mut current, Drain::new(child)), c));
                }
            }
        }
    }

    /// Number of stored strings.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no string is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored strings starting with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        if prefix.is_empty() {
            return self.len;
        }
        self.find(prefix).map_or(0, |node| node.refs)
    }

    /// Removes every stored string.
    pub fn clear(&mut self) {
        self.root = HeapNode::new();
        self.len = 0;
    }

    /// Total pending-removal credits not yet consumed by a `sort`.
    pub fn pending_removals(&self) -> usize {
        self.root.pending_total()
    }

    /// Recounts every subtree and checks reference counts, heap bookkeeping and
    /// the stored-string total.
    pub fn audit(&self) -> TrieResult<()> {
        let mut path = String::new();
        let stored = Self::audit_node(&self.root, &mut path)?;
        if stored != self.len {
            return Err(TrieError::InvariantViolation(format!(
                "{stored} terminal markers but len is {}",
                self.len
            )));
        }
        Ok(())
    }

    /// Returns the number of terminal markers at or below `root`.
    fn audit_node(root: &HeapNode, path: &mut String) -> TrieResult<usize> {
        Self::audit_heap(root, path)?;
        let mut current = Tally::new(root);
        let mut parents = Vec::new();
        loop {
            match current.children.next() {
                Some((symbol, entry)) => match (symbol.as_char(), entry) {
                    (None, HeapEntry::Terminal) => current.stored += 1,
                    (Some(c), HeapEntry::Branch(next)) => {
                        path.push(c);
                        Self::audit_heap(next, path)?;
                        parents.push(std::mem::replace(&mut current, Tally::new(next)));
                    }
                    _ => {
                        return Err(TrieError::InvariantViolation(format!(
                            "child {symbol} of {path:?} has the wrong entry kind"
                        )))
                    }
                },
                None => {
                    let (node, below) = (current.node, current.stored);
                    let Some(parent) = parents.pop() else {
                        return Ok(below);
                    };
                    if node.refs == 0 || node.refs != below {
                        return Err(TrieError::InvariantViolation(format!(
                            "node {path:?} has refs {} but {below} strings pass through it",
                            node.refs
                        )));
                    }
                    path.pop();
                    current = parent;
                    current.stored += below;
                }
            }
        }
    }

    /// Checks one node's heap against its live children and pending credits.
    fn audit_heap(node: &HeapNode, path: &str) -> TrieResult<()> {
        let mut occurrences: FnvHashMap<Symbol, usize> = FnvHashMap::default();
        for Reverse(symbol) in node.keys.iter() {
            *occurrences.entry(*symbol).or_insert(0) += 1;
        }

        // Every live child appears exactly once beyond its pending credits,
        // every dead symbol appears exactly as often as its credits.
        let symbols = occurrences
            .keys()
            .chain(node.children.keys())
            .chain(node.pending.keys());
        for symbol in symbols {
            let seen = occurrences.get(symbol).copied().unwrap_or(0);
            let credits = node.pending.get(symbol).copied().unwrap_or(0);
            let live = usize::from(node.children.contains_key(symbol));
            if node.pending.get(symbol) == Some(&0) || seen.checked_sub(credits) != Some(live) {
                return Err(TrieError::InvariantViolation(format!(
                    "heap at {path:?} holds {symbol} {seen} times with {credits} credits, {live} live"
                )));
            }
        }
        Ok(())
    }
}

/// A node being drained by `sort`, with the live symbols popped so far.
struct Drain {
    node: HeapNode,
    kept: Vec<Reverse<Symbol>>,
}

impl Drain {
    fn new(node: HeapNode) -> Self {
        Self {
            kept: Vec::with_capacity(node.keys.len()),
            node,
        }
    }

    /// Consumes one pending credit for `symbol`, returning `true` if the
    /// popped entry was stale.
    fn discard_stale(&mut self, symbol: Symbol) -> bool {
        let Some(credits) = self.node.pending.get_mut(&symbol) else {
            return false;
        };
        *credits -= 1;
        if *credits == 0 {
            self.node.pending.remove(&symbol);
        }
        true
    }

    /// Stores the kept symbols back as the node's heap.
    fn finish(self) -> HeapNode {
        let Drain { mut node, kept } = self;
        // Popped in ascending order, so `kept` is already a valid heap layout
        node.keys = BinaryHeap::from(kept);
        node
    }
}

/// Audit progress through one node: children still to visit and terminal
/// markers counted below it so far.
struct Tally<'a> {
    node: &'a HeapNode,
    children: std::collections::hash_map::Iter<'a, Symbol, HeapEntry>,
    stored: usize,
}

impl<'a> Tally<'a> {
    fn new(node: &'a HeapNode) -> Self {
        Self {
            node,
            children: node.children.iter(),
            stored: 0,
        }
    }
}

impl fmt::Debug for HeapTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapTrie")
            .field("len", &self.len)
            .field("config", &self.config)
            .field("pending_removals", &self.pending_removals())
            .finish_non_exhaustive()
    }
}

impl Default for HeapTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> Extend<S> for HeapTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for HeapTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl PrefixTrie for HeapTrie {
    fn insert(&mut self, key: &str) {
        HeapTrie::insert(self, key)
    }

    fn delete(&mut self, key: &str) -> TrieResult<()> {
        HeapTrie::delete(self, key)
    }

    fn search(&self, key: &str) -> bool {
        HeapTrie::search(self, key)
    }

    fn sort(&mut self, prefix: &str) -> Vec<String> {
        HeapTrie::sort(self, prefix)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn count_prefix(&self, prefix: &str) -> usize {
        HeapTrie::count_prefix(self, prefix)
    }

    fn clear(&mut self) {
        HeapTrie::clear(self)
    }

    fn audit(&self) -> TrieResult<()> {
        HeapTrie::audit(self)
    }

    fn backend(&self) -> TrieBackend {
        TrieBackend::HashedHeap
    }
}
