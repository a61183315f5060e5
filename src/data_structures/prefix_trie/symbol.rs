// Copyright (c) 2025 Lexi Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Child keys of a trie node.

use std::fmt;

/// Key of one child edge.
///
/// `Terminal` marks "a stored string ends here". It is declared first so the
/// derived ordering places it before every real character, which is what lets
/// enumeration emit `"ca"` before `"car"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// End-of-string marker.
    Terminal,
    /// A real character of a stored string.
    Char(char),
}

impl Symbol {
    /// Returns `true` for the end-of-string marker.
    pub fn is_terminal(self) -> bool {
        matches!(self, Symbol::Terminal)
    }

    /// The character carried by this symbol, if any.
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Terminal => None,
            Symbol::Char(c) => Some(c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal => f.write_str("$"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}
