use std::fmt;

/// Position of a node within a compiled [`Pattern`](crate::Pattern).
pub type NodeId = usize;

/// One unit of a compiled pattern.
///
/// Quantifiers that repeat greedily carry `next`, the position of the node
/// that follows them in the same pattern. It is only ever used to peek
/// ahead and always points forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(u8),
    Wildcard,
    ZeroOrOne(Box<Node>),
    ZeroOrMore {
        inner: Box<Node>,
        next: Option<NodeId>,
    },
    AtLeastOne {
        inner: Box<Node>,
        next: Option<NodeId>,
    },
    StartAnchor(Box<Node>),
    EndAnchor(Box<Node>),
}

impl Node {
    /// The lookahead target of a greedy quantifier, seen through a
    /// wrapping [`Node::StartAnchor`].
    pub fn next(&self) -> Option<NodeId> {
        match self {
            Node::ZeroOrMore { next, .. } | Node::AtLeastOne { next, .. } => *next,
            Node::StartAnchor(inner) => inner.next(),
            _ => None,
        }
    }

    /// Points a greedy quantifier's lookahead at `target`.
    ///
    /// Returns `false` if the node is not a greedy quantifier, in which
    /// case it is left untouched.
    pub(crate) fn set_next(&mut self, target: NodeId) -> bool {
        match self {
            Node::ZeroOrMore { next, .. } | Node::AtLeastOne { next, .. } => {
                *next = Some(target);
                true
            }
            Node::StartAnchor(inner) => inner.set_next(target),
            _ => false,
        }
    }
}

fn write_unit(f: &mut fmt::Formatter<'_>, b: u8) -> fmt::Result {
    if matches!(b, b'.' | b'+' | b'*' | b'?' | b'\\' | b'^' | b'$') {
        write!(f, "\\")?;
    }
    if b.is_ascii() {
        write!(f, "{}", b as char)
    } else {
        write!(f, "\\x{b:02x}")
    }
}

/// Renders the node in pattern syntax. Code units outside ASCII are shown
/// as `\xNN` and do not compile back to the same node.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(b) => write_unit(f, *b),
            Node::Wildcard => write!(f, "."),
            Node::ZeroOrOne(inner) => write!(f, "{inner}?"),
            Node::ZeroOrMore { inner, .. } => write!(f, "{inner}*"),
            Node::AtLeastOne { inner, .. } => write!(f, "{inner}+"),
            Node::StartAnchor(inner) => write!(f, "^{inner}"),
            Node::EndAnchor(inner) => write!(f, "{inner}$"),
        }
    }
}
