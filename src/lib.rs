//! Lexi Trie Library
//!
//! This library provides a prefix trie for autocomplete and prefix search in
//! two interchangeable backends, together with the configuration, error and
//! script plumbing used by the `lexi_trie` command-line tool.
//!
//! # Architecture
//!
//! - `data_structures`: the `PrefixTrie` contract and its ordered-sibling and
//!   hashed-heap backends
//! - `config`: layered configuration loading and validation
//! - `error`: crate-level error type and error reporting
//! - `script`: line-oriented command scripts replayed against a trie

pub mod config;
pub mod data_structures;
pub mod error;
pub mod script;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Lexi Trie crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
