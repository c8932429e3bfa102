use log::trace;

use crate::ast::Node;

/// Attempt `node` at `pos`, returning the position after what it consumed.
///
/// `nodes` is the sequence `node` was compiled into; greedy quantifiers
/// look up their `next` node there. A greedy quantifier that runs out of
/// input returns the last valid position of `input`.
pub fn match_node(node: &Node, nodes: &[Node], input: &[u8], pos: usize) -> Option<usize> {
    span(node, nodes, input, pos).map(|span| span.end)
}

// Where a match ends, and whether it used up the whole input on the way.
#[derive(Debug, Clone, Copy)]
struct Span {
    end: usize,
    exhausted: bool,
}

impl Span {
    fn empty(pos: usize) -> Self {
        Self {
            end: pos,
            exhausted: false,
        }
    }

    fn unit(input: &[u8], pos: usize) -> Self {
        Self {
            end: pos + 1,
            exhausted: pos + 1 == input.len(),
        }
    }
}

fn span(node: &Node, nodes: &[Node], input: &[u8], pos: usize) -> Option<Span> {
    match node {
        Node::Literal(c) => (input.get(pos) == Some(c)).then(|| Span::unit(input, pos)),
        Node::Wildcard => (pos < input.len()).then(|| Span::unit(input, pos)),
        Node::ZeroOrOne(inner) => Some(span(inner, nodes, input, pos).unwrap_or(Span::empty(pos))),
        Node::ZeroOrMore { inner, next } => match match_node(inner, nodes, input, pos) {
            Some(end) => Some(repeat(inner, lookahead(nodes, *next), nodes, input, end)),
            None => Some(Span::empty(pos)),
        },
        Node::AtLeastOne { inner, next } => match_node(inner, nodes, input, pos)
            .map(|end| repeat(inner, lookahead(nodes, *next), nodes, input, end)),
        Node::StartAnchor(inner) => {
            if pos == 0 {
                span(inner, nodes, input, pos)
            } else {
                None
            }
        }
        // Accepted on the last position, or when the inner match ran
        // through to the end of the input (`^a+$` against `aaa`).
        Node::EndAnchor(inner) => span(inner, nodes, input, pos)
            .filter(|inner| pos + 1 >= input.len() || inner.exhausted)
            .map(|inner| Span {
                end: pos,
                exhausted: inner.exhausted,
            }),
    }
}

fn lookahead(nodes: &[Node], next: Option<usize>) -> Option<&Node> {
    next.and_then(|id| nodes.get(id))
}

// Keep consuming `inner` until it stops matching or `next` could already
// take over. This is a one-step lookahead, not backtracking.
fn repeat(inner: &Node, next: Option<&Node>, nodes: &[Node], input: &[u8], mut pos: usize) -> Span {
    while pos < input.len() {
        let yields = next.is_some_and(|n| match_node(n, nodes, input, pos).is_some());
        match match_node(inner, nodes, input, pos) {
            Some(end) if !yields && end > pos => pos = end,
            _ => return Span::empty(pos),
        }
    }
    Span {
        end: input.len().saturating_sub(1),
        exhausted: true,
    }
}

/// Returns the first start offset at which every node of `nodes` matches.
///
/// An empty sequence matches at offset 0 of any input, the empty input
/// included. Otherwise only offsets inside `input` are tried.
pub fn find_match(nodes: &[Node], input: &[u8]) -> Option<usize> {
    if nodes.is_empty() {
        return Some(0);
    }
    (0..input.len()).find(|&start| match_at(nodes, input, start))
}

// A node whose match reaches the end of the input counts as satisfied
// but does not move the running position.
fn match_at(nodes: &[Node], input: &[u8], start: usize) -> bool {
    let mut pos = start;
    for (id, node) in nodes.iter().enumerate() {
        match match_node(node, nodes, input, pos) {
            Some(end) if end >= input.len() => {}
            Some(end) => pos = end,
            None => {
                trace!("offset {start}: node {id} ({node}) failed at {pos}");
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: u8) -> Box<Node> {
        Box::new(Node::Literal(c))
    }

    #[test]
    fn repeat_stops_on_zero_width_inner() {
        let nodes = [Node::ZeroOrMore {
            inner: Box::new(Node::ZeroOrOne(lit(b'x'))),
            next: None,
        }];
        assert_eq!(match_node(&nodes[0], &nodes, b"aaa", 0), Some(0));
    }

    #[test]
    fn dangling_lookahead_is_ignored() {
        let node = Node::AtLeastOne {
            inner: lit(b'a'),
            next: Some(7),
        };
        assert_eq!(match_node(&node, &[], b"aab", 0), Some(2));
    }

    #[test]
    fn exhausting_the_input_stops_on_the_last_position() {
        let node = Node::ZeroOrMore {
            inner: Box::new(Node::Wildcard),
            next: None,
        };
        let rest = span(&node, &[], b"abc", 1).unwrap();
        assert_eq!(rest.end, 2);
        assert!(rest.exhausted);

        let last = span(&Node::Literal(b'c'), &[], b"abc", 2).unwrap();
        assert_eq!(last.end, 3);
        assert!(last.exhausted);
    }
}
