//! A small pattern matcher for a restricted regex syntax: literals, `.`,
//! the `?`, `*` and `+` quantifiers, `\` escapes and `^`/`$` anchors.
//!
//! Patterns compile into a flat chain of [`Node`]s. Greedy quantifiers stop
//! as soon as the node after them can match, so there is no backtracking.

use std::fmt;
use std::str::FromStr;

pub mod ast;
pub mod error;
pub mod matcher;
pub mod parser;

pub use ast::{Node, NodeId};
pub use error::{Error, Result};
pub use parser::compile;

/// A compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    nodes: Vec<Node>,
}

impl Pattern {
    /// Compiles `pattern`; see [`compile`].
    pub fn new(pattern: &str) -> Result<Self> {
        compile(pattern)
    }

    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The compiled nodes, in match order. A node's [`NodeId`] is its
    /// index here.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of compiled nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the pattern has no nodes and so matches any subject.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether some substring of `subject` matches.
    pub fn is_match(&self, subject: &str) -> bool {
        self.is_match_bytes(subject.as_bytes())
    }

    /// Like [`Pattern::is_match`], over raw code units.
    pub fn is_match_bytes(&self, subject: &[u8]) -> bool {
        let found = matcher::find_match(&self.nodes, subject);
        log::debug!("{self} against {:?}: {found:?}", String::from_utf8_lossy(subject));
        found.is_some()
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Compiles `pattern` and searches `input` with it.
pub fn is_match(input: &str, pattern: &str) -> Result<bool> {
    Ok(Pattern::new(pattern)?.is_match(input))
}
