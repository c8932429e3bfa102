use log::{debug, trace};

use crate::ast::Node;
use crate::error::{Error, Result};
use crate::Pattern;

const ESCAPE: u8 = b'\\';
const START: u8 = b'^';
const END: u8 = b'$';

/// Compiles `pattern` into a [`Pattern`].
///
/// # Errors
///
/// Returns an [`Error`] for a trailing lone `\`, a quantifier with nothing
/// before it, or an anchor with an empty body.
pub fn compile(pattern: &str) -> Result<Pattern> {
    let compiled = Parser::new(pattern).parse()?;
    debug!(
        "compiled {pattern:?} into {} node(s): {compiled}",
        compiled.len()
    );
    Ok(compiled)
}

/// Parser for the restricted pattern syntax.
///
/// Anchors are detected up front; `pos..end` then covers the body between
/// them. Positions are byte offsets into the full pattern so errors point
/// at the original text.
pub struct Parser<'a> {
    pattern: &'a [u8],
    pos: usize,
    end: usize,
    has_start: bool,
    has_end: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        let pattern = pattern.as_bytes();
        let has_start = pattern.first() == Some(&START);
        let pos = usize::from(has_start);
        let has_end = pattern.len() > pos
            && pattern.last() == Some(&END)
            && !is_escaped(&pattern[pos..], pattern.len() - 1 - pos);
        let end = pattern.len() - usize::from(has_end);
        Self {
            pattern,
            pos,
            end,
            has_start,
            has_end,
        }
    }

    /// Peek at the next code unit of the body without advancing.
    fn peek(&self) -> Option<u8> {
        (self.pos < self.end).then(|| self.pattern[self.pos])
    }

    /// Advance the parser by one code unit and return it.
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Parses the whole pattern, consuming the parser.
    ///
    /// Example:
    /// - Pattern: `^ab+c$` → [StartAnchor(Literal('a')), AtLeastOne { Literal('b'), next: 2 }, EndAnchor(Literal('c'))]
    pub fn parse(mut self) -> Result<Pattern> {
        let mut nodes = Vec::new();
        let mut after_escape = false;
        while let Some(b) = self.advance() {
            if b == ESCAPE {
                nodes.push(self.parse_escape()?);
                after_escape = true;
                continue;
            }
            let atom = self.parse_atom(b, after_escape)?;
            nodes.push(self.parse_repeat(atom));
            after_escape = false;
        }

        if nodes.is_empty() {
            if self.has_start {
                return Err(Error::EmptyAnchor {
                    pos: 0,
                    anchor: START as char,
                });
            }
            if self.has_end {
                return Err(Error::EmptyAnchor {
                    pos: self.end,
                    anchor: END as char,
                });
            }
            return Ok(Pattern::from_nodes(nodes));
        }

        link_lookahead(&mut nodes);
        if self.has_start {
            wrap(&mut nodes[0], Node::StartAnchor);
        }
        if self.has_end {
            anchor_end(&mut nodes);
        }
        Ok(Pattern::from_nodes(nodes))
    }

    /// Parse an escape whose `\` was just consumed. The escaped unit is
    /// always a bare literal and never takes a quantifier.
    ///
    /// Examples:
    /// - Pattern: `\.`  → Literal('.')
    /// - Pattern: `\.+` → Literal('.'), Literal('+')
    fn parse_escape(&mut self) -> Result<Node> {
        let pos = self.pos - 1;
        match self.advance() {
            Some(escaped) => Ok(Node::Literal(escaped)),
            None => Err(Error::TrailingEscape { pos }),
        }
    }

    /// Parse a single atom whose code unit `b` was just consumed.
    ///
    /// A quantifier only starts an atom right after an escape; anywhere
    /// else it has nothing to repeat.
    ///
    /// Examples:
    /// - Pattern: `.`   → Wildcard
    /// - Pattern: `a`   → Literal('a')
    fn parse_atom(&self, b: u8, after_escape: bool) -> Result<Node> {
        match b {
            b'.' => Ok(Node::Wildcard),
            b'+' | b'*' | b'?' if !after_escape => Err(Error::DanglingQuantifier {
                pos: self.pos - 1,
                quantifier: b as char,
            }),
            _ => Ok(Node::Literal(b)),
        }
    }

    /// Parse a quantifier suffix (`+`, `*`, `?`) after an atom.
    ///
    /// Example:
    /// - Pattern: `a+` → AtLeastOne { inner: Literal('a'), next: None }
    /// - Pattern: `a*` → ZeroOrMore { inner: Literal('a'), next: None }
    /// - Pattern: `a?` → ZeroOrOne(Literal('a'))
    fn parse_repeat(&mut self, atom: Node) -> Node {
        let inner = Box::new(atom);
        let node = match self.peek() {
            Some(b'+') => Node::AtLeastOne { inner, next: None },
            Some(b'*') => Node::ZeroOrMore { inner, next: None },
            Some(b'?') => Node::ZeroOrOne(inner),
            _ => return *inner,
        };
        self.advance();
        node
    }
}

/// Whether the code unit at `pos` is preceded by an odd run of escapes.
fn is_escaped(body: &[u8], pos: usize) -> bool {
    body[..pos].iter().rev().take_while(|&&b| b == ESCAPE).count() % 2 == 1
}

/// Points every greedy quantifier at the node that follows it.
fn link_lookahead(nodes: &mut [Node]) {
    let count = nodes.len();
    for (id, node) in nodes.iter_mut().enumerate().take(count.saturating_sub(1)) {
        if node.set_next(id + 1) {
            trace!("node {id} looks ahead at node {}", id + 1);
        }
    }
}

fn wrap(slot: &mut Node, anchor: fn(Box<Node>) -> Node) {
    let inner = std::mem::replace(slot, Node::Wildcard);
    *slot = anchor(Box::new(inner));
}

/// Wraps the last node in `EndAnchor` and points the quantifier before it,
/// if any, at the wrapped node.
///
/// Lookahead links are positions, so the wrapper already sits where the
/// link points; retargeting keeps that true should the layout change.
fn anchor_end(nodes: &mut [Node]) {
    let Some(last) = nodes.len().checked_sub(1) else {
        return;
    };
    wrap(&mut nodes[last], Node::EndAnchor);
    if let Some(prev) = last.checked_sub(1) {
        if nodes[prev].set_next(last) {
            trace!("node {prev} looks ahead at end anchor {last}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_parity() {
        assert!(is_escaped(b"a\\$", 2));
        assert!(!is_escaped(b"a\\\\$", 3));
        assert!(!is_escaped(b"$", 0));
    }

    #[test]
    fn anchors_are_detected_before_the_body() {
        let parser = Parser::new("^ab$");
        assert!(parser.has_start && parser.has_end);
        assert_eq!((parser.pos, parser.end), (1, 3));

        let parser = Parser::new("ab\\$");
        assert!(!parser.has_end);
        assert_eq!(parser.end, 4);

        let parser = Parser::new("^");
        assert!(parser.has_start && !parser.has_end);
        assert_eq!((parser.pos, parser.end), (1, 1));
    }

    #[test]
    fn retargets_quantifier_wrapped_in_start_anchor() {
        let mut nodes = vec![
            Node::StartAnchor(Box::new(Node::AtLeastOne {
                inner: Box::new(Node::Literal(b'a')),
                next: None,
            })),
            Node::Literal(b'b'),
        ];
        anchor_end(&mut nodes);
        assert_eq!(nodes[0].next(), Some(1));
        assert!(matches!(nodes[1], Node::EndAnchor(_)));
    }
}
