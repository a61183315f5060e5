//! Data structures for the Lexi Trie library.
//!
//! This module contains the prefix trie contract and its two backends:
//! - `prefix_trie`: the shared `PrefixTrie` trait, symbols, configuration and errors
//! - `sibling_trie`: children kept in one sorted sequence per node
//! - `heap_trie`: children in a hash map, ordering recovered from a lazily pruned min-heap

pub mod heap_trie;
pub mod prefix_trie;
pub mod sibling_trie;

// Re-export common data structures
pub use heap_trie::HeapTrie;
pub use prefix_trie::{build_trie, PrefixTrie, TrieBackend, TrieConfig, TrieError, TrieResult};
pub use sibling_trie::SiblingTrie;
