//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::prefix_trie::TrieError;
use crate::error::config::ConfigError;
use crate::error::{ErrorContext, ErrorReporter, LexiError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = LexiError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that component errors convert and display through `LexiError`.
#[test]
fn test_nested_errors() {
    let error: LexiError = TrieError::NotFound("cat".to_string()).into();
    assert_eq!(error.to_string(), "Trie error: string 'cat' is not in the trie");

    let error: LexiError = ConfigError::ValidationError("bad level".to_string()).into();
    assert!(error.to_string().contains("bad level"));

    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = LexiError::Io(io_error);
    assert!(error.to_string().contains("file not found"));

    let error = LexiError::Script {
        line: 4,
        message: "unknown command 'x'".to_string(),
    };
    assert_eq!(error.to_string(), "Script error at line 4: unknown command 'x'");
}

/// Mock error reporter for testing.
#[derive(Debug, Default)]
struct MockErrorReporter {
    reported_count: AtomicUsize,
}

impl ErrorReporter for MockErrorReporter {
    fn report(&self, _context: &ErrorContext) {
        self.reported_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test that reporters receive contexts.
#[test]
fn test_error_reporter() {
    let reporter = MockErrorReporter::default();
    let context = ErrorContext::new(LexiError::Custom("boom".to_string()), "test");

    reporter.report(&context);
    reporter.report(&context);
    assert_eq!(reporter.reported_count.load(Ordering::SeqCst), 2);
}
