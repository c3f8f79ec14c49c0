//! Position and comment resolution for emitted records
//!
//!     The decoder records only a start position per node. End positions are
//!     derived here: a single-line scalar ends `len(value)` columns after it
//!     starts; a scalar with an internal line break cannot be measured from
//!     its value alone, so its span collapses to the start position rather
//!     than guessing. Containers and documents have no distinct source end,
//!     so their spans are points at the recorded position.

use crate::yamlens::node::{Comments, Node, Position, Span};

/// Derive the span of a scalar value starting at `position`.
pub fn scalar_span(position: Position, value: &str) -> Span {
    if value.is_empty() || value.contains('\n') {
        return Span::point(position);
    }
    Span {
        start: position,
        end: Position::new(position.line, position.column + value.chars().count()),
    }
}

/// Derive the span of any node.
pub fn span(node: &Node) -> Span {
    match node {
        Node::Scalar(scalar) => scalar_span(scalar.position, &scalar.value),
        _ => Span::point(node.position()),
    }
}

/// Comments to attach to the record emitted for `node`, verbatim.
pub fn comments(node: &Node) -> &Comments {
    node.comments()
}
