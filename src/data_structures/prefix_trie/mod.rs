// Copyright (c) 2025 Lexi Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Shared contract for the prefix trie backends.
//!
//! Every backend stores a set of strings in a rooted tree where each
//! root-to-terminal path spells one stored string. Each node below the root
//! carries a reference count of the stored strings passing through it, and a
//! node whose count drops to zero is unlinked from its parent on the spot,
//! taking its whole subtree with it.
//!
//! Two backends implement [`PrefixTrie`]:
//!
//! - [`SiblingTrie`](crate::data_structures::sibling_trie::SiblingTrie) keeps
//!   each node's children in one sorted sequence, so ordering is always
//!   available at the price of a linear child scan.
//! - [`HeapTrie`](crate::data_structures::heap_trie::HeapTrie) looks children up
//!   in a hash map and recovers ordering through a min-heap whose stale entries
//!   are discarded lazily during the next `sort`.
//!
//! # Example
//!
//! ```
//! use lexi_trie_lib::data_structures::prefix_trie::{build_trie, TrieBackend, TrieConfig};
//!
//! let mut trie = build_trie(&TrieConfig::new().with_backend(TrieBackend::HashedHeap));
//! for word in ["cat", "cats", "car", "dog"] {
//!     trie.insert(word);
//! }
//!
//! assert_eq!(trie.sort("ca"), vec!["car", "cat", "cats"]);
//! trie.delete("cat").unwrap();
//! assert!(!trie.search("cat"));
//! assert!(trie.search("cats"));
//! ```

mod config;
mod error;
mod symbol;

pub use config::{TrieBackend, TrieConfig};
pub use error::{TrieError, TrieResult};
pub use symbol::Symbol;

use crate::data_structures::heap_trie::HeapTrie;
use crate::data_structures::sibling_trie::SiblingTrie;

/// Operations common to every trie backend.
///
/// `sort` takes `&mut self` because the hashed-heap backend reconciles its
/// lazily deleted ordering metadata while enumerating.
pub trait PrefixTrie: std::fmt::Debug + Send {
    /// Stores `key`. Does nothing if it is already stored.
    fn insert(&mut self, key: &str);

    /// Removes `key`, failing with [`TrieError::NotFound`] if it is absent.
    fn delete(&mut self, key: &str) -> TrieResult<()>;

    /// Returns `true` if `key` is stored.
    fn search(&self, key: &str) -> bool;

    /// All stored strings starting with `prefix`, in ascending order.
    fn sort(&mut self, prefix: &str) -> Vec<String>;

    /// Number of stored strings.
    fn len(&self) -> usize;

    /// Returns `true` if no string is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored strings that start with `prefix`.
    fn count_prefix(&self, prefix: &str) -> usize;

    /// Returns `true` if at least one stored string starts with `prefix`.
    fn contains_prefix(&self, prefix: &str) -> bool {
        self.count_prefix(prefix) > 0
    }

    /// Removes every stored string.
    fn clear(&mut self);

    /// Recounts the whole structure and reports the first broken invariant.
    fn audit(&self) -> TrieResult<()>;

    /// The backend behind this trie.
    fn backend(&self) -> TrieBackend;
}

/// Builds an empty trie of the configured backend.
pub fn build_trie(config: &TrieConfig) -> Box<dyn PrefixTrie> {
    match config.backend {
        TrieBackend::OrderedSibling => Box::new(SiblingTrie::with_config(config.clone())),
        TrieBackend::HashedHeap => Box::new(HeapTrie::with_config(config.clone())),
    }
}

/// Panics with the audit failure when mutation auditing is enabled.
pub(crate) fn audit_after_mutation<T: PrefixTrie + ?Sized>(trie: &T, config: &TrieConfig) {
    if !config.audit_mutations {
        return;
    }
    if let Err(err) = trie.audit() {
        tracing::error!(error = %err, backend = %trie.backend(), "Trie audit failed after mutation");
        panic!("{err}");
    }
}
