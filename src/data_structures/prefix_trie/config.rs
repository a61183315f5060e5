// Copyright (c) 2025 Lexi Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for prefix trie construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Child-set representation used by a trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TrieBackend {
    /// Children kept in one sorted sequence per node.
    OrderedSibling,
    /// Children in a hash map, order recovered through a lazily pruned min-heap.
    HashedHeap,
}

impl Default for TrieBackend {
    fn default() -> Self {
        TrieBackend::OrderedSibling
    }
}

impl fmt::Display for TrieBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrieBackend::OrderedSibling => f.write_str("ordered_sibling"),
            TrieBackend::HashedHeap => f.write_str("hashed_heap"),
        }
    }
}

/// Configuration for a prefix trie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieConfig {
    /// Which backend `build_trie` constructs.
    pub backend: TrieBackend,

    /// Run a full `audit` after every insert and delete and panic on failure.
    /// Expensive: intended for development and tests.
    pub audit_mutations: bool,
}

impl TrieConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - backend: `OrderedSibling`
    /// - audit_mutations: false
    pub fn new() -> Self {
        Self {
            backend: TrieBackend::default(),
            audit_mutations: false,
        }
    }

    /// Set the backend.
    pub fn with_backend(mut self, backend: TrieBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable auditing after every mutation.
    pub fn with_audit_mutations(mut self, audit_mutations: bool) -> Self {
        self.audit_mutations = audit_mutations;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrieConfig::default();
        assert_eq!(config.backend, TrieBackend::OrderedSibling);
        assert!(!config.audit_mutations);
    }

    #[test]
    fn test_config_builder() {
        let config = TrieConfig::new()
            .with_backend(TrieBackend::HashedHeap)
            .with_audit_mutations(true);

        assert_eq!(config.backend, TrieBackend::HashedHeap);
        assert!(config.audit_mutations);
    }

    #[test]
    fn test_backend_serde_names() {
        let json = serde_json::to_string(&TrieBackend::HashedHeap).unwrap();
        assert_eq!(json, "\"hashed_heap\"");

        let backend: TrieBackend = serde_json::from_str("\"ordered_sibling\"").unwrap();
        assert_eq!(backend, TrieBackend::OrderedSibling);
        assert_eq!(backend.to_string(), "ordered_sibling");
    }
}
