//! Test modules for the Lexi Trie crate.
//!
//! This module contains the cross-cutting test suites:
//! - Property-based tests driving both trie backends against a reference model
//! - Configuration loading and validation tests
//! - Error type and reporting tests
//! - Shared strategies and fixtures

pub mod error_tests;
pub mod prefix_trie_tests;
pub mod test_utils;

pub use test_utils::{key_strategy, op_strategy, Op, TestFixture};
