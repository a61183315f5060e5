//! Command scripts replayed against a trie.
//!
//! A script is plain text with one command per line:
//!
//! ```text
//! # comment
//! insert cats
//! delete cat
//! search cat
//! sort ca
//! count ca
//! len
//! ```
//!
//! The argument is everything after the first space, so `insert` with no
//! argument stores the empty string and `sort` with no argument lists every
//! stored string. Queries produce an [`Outcome`]; mutations produce nothing.

use serde::Serialize;
use tracing::debug;

use crate::data_structures::prefix_trie::PrefixTrie;
use crate::error::{LexiError, LexiResult};

/// One parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a string
    Insert(String),
    /// Remove a stored string
    Delete(String),
    /// Membership query
    Search(String),
    /// Ordered enumeration under a prefix
    Sort(String),
    /// Number of stored strings under a prefix
    Count(String),
    /// Number of stored strings
    Len,
}

impl Command {
    /// Parses one script line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, String> {
        let line = line.strip_suffix('\r').unwrap_or(line).trim_start();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.to_string();
        let command = match name {
            "insert" => Command::Insert(argument),
            "delete" => Command::Delete(argument),
            "search" => Command::Search(argument),
            "sort" => Command::Sort(argument),
            "count" => Command::Count(argument),
            "len" if argument.is_empty() => Command::Len,
            "len" => return Err("len takes no argument".to_string()),
            other => return Err(format!("unknown command '{other}'")),
        };
        Ok(Some(command))
    }
}

/// Result of one query command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outcome {
    /// Answer to `search`
    Search {
        /// The string looked up
        key: String,
        /// Whether it is stored
        found: bool,
    },
    /// Answer to `sort`
    Sort {
        /// The prefix enumerated
        prefix: String,
        /// Matching strings in ascending order
        matches: Vec<String>,
    },
    /// Answer to `count` and `len`
    Count {
        /// The prefix counted (empty for `len`)
        prefix: String,
        /// Number of stored strings under it
        count: usize,
    },
}

/// Executes a single command, returning its outcome if it is a query.
pub fn execute(trie: &mut dyn PrefixTrie, command: Command) -> LexiResult<Option<Outcome>> {
    let outcome = match command {
        Command::Insert(key) => {
            trie.insert(&key);
            None
        }
        Command::Delete(key) => {
            trie.delete(&key)?;
            None
        }
        Command::Search(key) => {
            let found = trie.search(&key);
            Some(Outcome::Search { key, found })
        }
        Command::Sort(prefix) => {
            let matches = trie.sort(&prefix);
            Some(Outcome::Sort { prefix, matches })
        }
        Command::Count(prefix) => {
            let count = trie.count_prefix(&prefix);
            Some(Outcome::Count { prefix, count })
        }
        Command::Len => Some(Outcome::Count {
            prefix: String::new(),
            count: trie.len(),
        }),
    };
    Ok(outcome)
}

/// Runs every line of `script` against `trie`, stopping at the first failure.
///
/// # Errors
///
/// Returns [`LexiError::Script`] carrying the 1-based line number for an
/// unparsable line or a failed delete.
pub fn run_script(trie: &mut dyn PrefixTrie, script: &str) -> LexiResult<Vec<Outcome>> {
    let mut outcomes = Vec::new();
    for (index, line) in script.lines().enumerate() {
        let line_number = index + 1;
        let command = Command::parse_line(line).map_err(|message| LexiError::Script {
            line: line_number,
            message,
        })?;
        let Some(command) = command else {
            continue;
        };

        debug!(line = line_number, ?command, "Executing script command");
        let outcome = execute(trie, command).map_err(|e| LexiError::Script {
            line: line_number,
            message: e.to_string(),
        })?;
        outcomes.extend(outcome);
    }
    Ok(outcomes)
}
