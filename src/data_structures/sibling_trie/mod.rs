// Copyright (c) 2025 Lexi Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Ordered-Sibling Trie Implementation
//!
//! Each node keeps its children in one sequence sorted by symbol, with the
//! terminal marker first. Lookups scan that sequence and stop as soon as they
//! pass the wanted symbol, and enumeration is a plain depth-first walk because
//! the order is maintained on every insert.
//!
//! # Complexity
//!
//! With `m` the key length and `|c|` the alphabet size:
//!
//! * `insert`, `delete`, `search`: O(m·|c|)
//! * `sort`: O(N·|t|) for N matches with longest remaining suffix |t|

mod node;

use std::fmt;

use tracing::{debug, trace};

use crate::data_structures::prefix_trie::{
    audit_after_mutation, PrefixTrie, Symbol, TrieBackend, TrieConfig, TrieError, TrieResult,
};
use node::{Sibling, SiblingNode};

/// Prefix trie whose child sets are sorted sequences.
///
/// # Examples
///
/// ```
/// use lexi_trie_lib::data_structures::sibling_trie::SiblingTrie;
///
/// let mut trie: SiblingTrie = ["cat", "cats", "car", "dog"].into_iter().collect();
///
/// assert_eq!(trie.sort("ca"), vec!["car", "cat", "cats"]);
/// assert!(trie.delete("cow").is_err());
/// ```
pub struct SiblingTrie {
    /// The root node; its own `refs` is never consulted
    root: SiblingNode,

    /// Number of stored strings
    len: usize,

    /// Configuration options
    config: TrieConfig,
}

impl SiblingTrie {
    /// Creates a new empty `SiblingTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::new().with_backend(TrieBackend::OrderedSibling))
    }

    /// Creates a new empty `SiblingTrie` with the specified configuration.
    ///
    /// The `backend` field of `config` is ignored.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            root: SiblingNode::new(),
            len: 0,
            config,
        }
    }

    /// Follows `prefix` from the root.
    fn find(&self, prefix: &str) -> Option<&SiblingNode> {
        let mut node = &self.root;
        for c in prefix.chars() {
            node = node.child(c)?;
        }
        Some(node)
    }

    /// Returns `true` if `key` is stored.
    pub fn search(&self, key: &str) -> bool {
        self.find(key).map_or(false, SiblingNode::has_terminal)
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
    /// Walks down decrementing reference counts; the first child whose count
    /// reaches zero is unlinked together with everything below it.
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
            let Ok(index) = node.locate(Symbol::from(c)) else {
                unreachable!("path of {key:?} verified by search");
            };
            let child = node.branch_mut(index);
            child.refs -= 1;
            if child.refs == 0 {
                node.children.remove(index);
                pruned = true;
                break;
            }
            node = node.branch_mut(index);
        }
        if !pruned {
            node.unmark_terminal();
        }

        debug!(key, pruned, len = self.len, "Deleted string");
        audit_after_mutation(&*self, &self.config);
        Ok(())
    }

    /// All stored strings starting with `prefix`, in ascending order.
    pub fn sort(&self, prefix: &str) -> Vec<String> {
        let mut strings = Vec::new();
        if let Some(node) = self.find(prefix) {
            let mut buffer = prefix.to_string();
            Self::collect(node, &mut buffer, &mut strings);
        }
        strings
    }

    /// Depth-first walk in child order, one stack entry per level.
    fn collect(node: &SiblingNode, buffer: &mut String, strings: &mut Vec<String>) {
        let mut stack = vec![node.children.iter()];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                Some(Sibling::Terminal) => strings.push(buffer.clone()),
                Some(Sibling::Branch(c, next)) => {
                    buffer.push(*c);
                    stack.push(next.children.iter());
                }
                None => {
                    stack.pop();
                    // The starting level owns the prefix, not a pushed character
                    if !stack.is_empty() {
                        buffer.pop();
                    }
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

    /// Number of stored strings starting with `prefix`, read from the
    /// reference count of the node `prefix` leads to.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        if prefix.is_empty() {
            return self.len;
        }
        self.find(prefix).map_or(0, |node| node.refs)
    }

    /// Removes every stored string.
    pub fn clear(&mut self) {
        self.root = SiblingNode::new();
        self.len = 0;
    }

    /// Recounts every subtree and checks ordering, reference counts and the
    /// stored-string total.
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
    fn audit_node(root: &SiblingNode, path: &mut String) -> TrieResult<usize> {
        Self::audit_order(root, path)?;
        let mut current = Tally::new(root);
        let mut parents = Vec::new();
        loop {
            match current.children.next() {
                Some(Sibling::Terminal) => current.stored += 1,
                Some(Sibling::Branch(c, next)) => {
                    path.push(*c);
                    Self::audit_order(next, path)?;
                    parents.push(std::mem::replace(&mut current, Tally::new(next)));
                }
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

    fn audit_order(node: &SiblingNode, path: &str) -> TrieResult<()> {
        for pair in node.children.windows(2) {
            let (left, right) = (pair[0].symbol(), pair[1].symbol());
            if left >= right {
                return Err(TrieError::InvariantViolation(format!(
                    "children of {path:?} out of order: {left} before {right}"
                )));
            }
        }
        Ok(())
    }
}

/// Audit progress through one node: children still to visit and terminal
/// markers counted below it so far.
struct Tally<'a> {
    node: &'a SiblingNode,
    children: std::slice::Iter<'a, Sibling>,
    stored: usize,
}

impl<'a> Tally<'a> {
    fn new(node: &'a SiblingNode) -> Self {
        Self {
            node,
            children: node.children.iter(),
            stored: 0,
        }
    }
}

impl fmt::Debug for SiblingTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiblingTrie")
            .field("len", &self.len)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for SiblingTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> Extend<S> for SiblingTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for SiblingTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl PrefixTrie for SiblingTrie {
    fn insert(&mut self, key: &str) {
        SiblingTrie::insert(self, key)
    }

    fn delete(&mut self, key: &str) -> TrieResult<()> {
        SiblingTrie::delete(self, key)
    }

    fn search(&self, key: &str) -> bool {
        SiblingTrie::search(self, key)
    }

    fn sort(&mut self, prefix: &str) -> Vec<String> {
        SiblingTrie::sort(self, prefix)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn count_prefix(&self, prefix: &str) -> usize {
        SiblingTrie::count_prefix(self, prefix)
    }

    fn clear(&mut self) {
        SiblingTrie::clear(self)
    }

    fn audit(&self) -> TrieResult<()> {
        SiblingTrie::audit(self)
    }

    fn backend(&self) -> TrieBackend {
        TrieBackend::OrderedSibling
    }
}
