// Copyright (c) 2025 Lexi Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types shared by every prefix trie backend.

/// Errors that can occur in prefix trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TrieError {
    /// `delete` was called for a string that is not stored.
    #[error("string '{0}' is not in the trie")]
    NotFound(String),

    /// A structural invariant does not hold. Only reported by `audit`.
    #[error("trie invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for prefix trie operations
pub type TrieResult<T> = std::result::Result<T, TrieError>;
