//! Node implementation for the ordered-sibling trie.
//!
//! A node owns its children in a single `Vec` kept sorted by symbol, with the
//! terminal marker (when present) always at index 0.

use std::cmp::Ordering;

use crate::data_structures::prefix_trie::Symbol;

/// One entry in a node's sorted child sequence.
#[derive(Debug)]
pub(crate) enum Sibling {
    /// A stored string ends at the owning node.
    Terminal,
    /// Continuation through `char`, owning the whole subtree below it.
    Branch(char, SiblingNode),
}

impl Sibling {
    /// The symbol this entry is ordered by.
    pub(crate) fn symbol(&self) -> Symbol {
        match self {
            Sibling::Terminal => Symbol::Terminal,
            Sibling::Branch(c, _) => Symbol::from(*c),
        }
    }

    /// The subtree owned by this entry, if it is a branch.
    fn into_node(self) -> Option<SiblingNode> {
        match self {
            Sibling::Terminal => None,
            Sibling::Branch(_, node) => Some(node),
        }
    }
}

/// A node in the ordered-sibling trie.
#[derive(Debug, Default)]
pub(crate) struct SiblingNode {
    /// Number of stored strings passing through this node
    pub(crate) refs: usize,

    /// Children in ascending symbol order
    pub(crate) children: Vec<Sibling>,
}

impl SiblingNode {
    /// Creates a new node with no children and no references.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scans the children for `symbol`.
    ///
    /// Returns `Ok(index)` on a match, otherwise `Err(index)` with the position
    /// that keeps the sequence sorted. The scan stops at the first child that
    /// sorts after `symbol`.
    pub(crate) fn locate(&self, symbol: Symbol) -> Result<usize, usize> {
        for (index, child) in self.children.iter().enumerate() {
            match child.symbol().cmp(&symbol) {
                Ordering::Less => continue,
                Ordering::Equal => return Ok(index),
                Ordering::Greater => return Err(index),
            }
        }
        Err(self.children.len())
    }

    /// The child reached through `c`, if any.
    pub(crate) fn child(&self, c: char) -> Option<&SiblingNode> {
        let index = self.locate(Symbol::from(c)).ok()?;
        match &self.children[index] {
            Sibling::Branch(_, node) => Some(node),
            Sibling::Terminal => None,
        }
    }

    /// Mutable access to the branch stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` holds the terminal marker; callers only pass indices
    /// obtained by locating a character.
    pub(crate) fn branch_mut(&mut self, index: usize) -> &mut SiblingNode {
        match &mut self.children[index] {
            Sibling::Branch(_, node) => node,
            Sibling::Terminal => unreachable!("a character never locates the terminal marker"),
        }
    }

    /// The child reached through `c`, created in sorted position if absent.
    pub(crate) fn child_or_insert(&mut self, c: char) -> &mut SiblingNode {
        let index = match self.locate(Symbol::from(c)) {
            Ok(index) => index,
            Err(index) => {
                self.children.insert(index, Sibling::Branch(c, SiblingNode::new()));
                index
            }
        };
        self.branch_mut(index)
    }

    /// Returns `true` if a stored string ends here.
    pub(crate) fn has_terminal(&self) -> bool {
        self.children
            .first()
            .map_or(false, |child| child.symbol().is_terminal())
    }

    /// Adds the terminal marker in front of the other children.
    pub(crate) fn mark_terminal(&mut self) {
        if !self.has_terminal() {
            self.children.insert(0, Sibling::Terminal);
        }
    }

    /// Removes the terminal marker, returning whether it was present.
    pub(crate) fn unmark_terminal(&mut self) -> bool {
        if self.has_terminal() {
            self.children.remove(0);
            true
        } else {
            false
        }
    }
}

impl Drop for SiblingNode {
    // Subtrees are as deep as the longest stored string, so they are torn
    // down from an explicit stack instead of through nested drop calls.
    fn drop(&mut self) {
        let mut stack: Vec<SiblingNode> = self
            .children
            .drain(..)
            .filter_map(Sibling::into_node)
            .collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain(..).filter_map(Sibling::into_node));
        }
    }
}
