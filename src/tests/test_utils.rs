//! Test utilities and fixtures for the Lexi Trie crate.
//!
//! This module provides reusable proptest strategies, a reference model for
//! trie behaviour and a temporary-directory fixture.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use std::collections::BTreeSet;
use tempfile::TempDir;

/// Maximum length of generated keys.
const MAX_KEY_LENGTH: usize = 6;

/// Generate keys over a tiny alphabet so that generated keys share prefixes often.
pub fn key_strategy() -> BoxedStrategy<String> {
    proptest::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'é']), 0..MAX_KEY_LENGTH)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .boxed()
}

/// One step of a generated operation sequence.
#[derive(Debug, Clone)]
pub enum Op {
    Insert(String),
    Delete(String),
    Sort(String),
}

/// Generate trie operations, biased towards inserts.
pub fn op_strategy() -> BoxedStrategy<Op> {
    prop_oneof![
        3 => key_strategy().prop_map(Op::Insert),
        2 => key_strategy().prop_map(Op::Delete),
        1 => key_strategy().prop_map(Op::Sort),
    ]
    .boxed()
}

/// Reference answers computed from an ordered set.
#[derive(Debug, Default)]
pub struct Model {
    keys: BTreeSet<String>,
}

impl Model {
    pub fn insert(&mut self, key: &str) {
        self.keys.insert(key.to_string());
    }

    /// Returns `true` if the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn sort(&self, prefix: &str) -> Vec<String> {
        self.keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.keys.iter().filter(|key| key.starts_with(prefix)).count()
    }

    /// Every prefix of every stored key, including the empty prefix.
    pub fn all_prefixes(&self) -> BTreeSet<String> {
        let mut prefixes = BTreeSet::new();
        prefixes.insert(String::new());
        for key in &self.keys {
            for (index, c) in key.char_indices() {
                prefixes.insert(key[..index + c.len_utf8()].to_string());
            }
        }
        prefixes
    }
}

/// Test fixture owning a temporary directory for config and word files.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn write_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
