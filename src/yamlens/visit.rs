//! Generic depth-first tree walk
//!
//!     One traversal serves both linearizers. The walk visits nodes in
//!     document order: pre-order for container starts, post-order for
//!     container ends. Visitors receive the concrete variant structs so they
//!     can read style, tag, anchor, position and comments directly.
//!
//!     The `before_*` hooks fire immediately before a mapping key's, mapping
//!     value's, or sequence element's own visits; only the token linearizer
//!     uses them, so they default to no-ops.

use crate::yamlens::node::{
    AliasNode, Comments, MappingNode, Node, Position, ScalarNode, SequenceNode, Style, Tag,
};

/// A container node being entered or left.
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Sequence(&'a SequenceNode),
    Mapping(&'a MappingNode),
}

impl<'a> Container<'a> {
    pub fn position(&self) -> Position {
        match self {
            Container::Sequence(sequence) => sequence.position,
            Container::Mapping(mapping) => mapping.position,
        }
    }

    pub fn comments(&self) -> &'a Comments {
        match self {
            Container::Sequence(sequence) => &sequence.comments,
            Container::Mapping(mapping) => &mapping.comments,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Container::Sequence(sequence) => sequence.style,
            Container::Mapping(mapping) => mapping.style,
        }
    }

    pub fn tag(&self) -> &'a Tag {
        match self {
            Container::Sequence(sequence) => &sequence.tag,
            Container::Mapping(mapping) => &mapping.tag,
        }
    }

    pub fn anchor(&self) -> Option<&'a str> {
        match self {
            Container::Sequence(sequence) => sequence.anchor.as_deref(),
            Container::Mapping(mapping) => mapping.anchor.as_deref(),
        }
    }
}

/// Visitor trait for the depth-first walk.
///
/// Implement the hooks you care about; the pre-hooks for mapping keys,
/// mapping values and sequence entries default to no-ops.
pub trait Visit {
    fn on_scalar(&mut self, scalar: &ScalarNode);
    fn on_alias(&mut self, alias: &AliasNode);
    fn on_container_start(&mut self, container: Container<'_>);
    fn on_container_end(&mut self, container: Container<'_>);

    fn before_key(&mut self, _key: &Node) {}
    fn before_value(&mut self, _value: &Node) {}
    fn before_entry(&mut self, _item: &Node) {}
}

/// Walk `node` depth-first in document order.
///
/// Documents are transparent: the walk descends straight into the root, so
/// callers control their own document bracketing. Aliases are visited as
/// leaves and never expanded.
pub fn walk(node: &Node, visitor: &mut dyn Visit) {
    match node {
        Node::Document(document) => walk(&document.root, visitor),
        Node::Scalar(scalar) => visitor.on_scalar(scalar),
        Node::Alias(alias) => visitor.on_alias(alias),
        Node::Sequence(sequence) => {
            visitor.on_container_start(Container::Sequence(sequence));
            for item in &sequence.items {
                visitor.before_entry(item);
                walk(item, visitor);
            }
            visitor.on_container_end(Container::Sequence(sequence));
        }
        Node::Mapping(mapping) => {
            visitor.on_container_start(Container::Mapping(mapping));
            for (key, value) in &mapping.pairs {
                visitor.before_key(key);
                walk(key, visitor);
                visitor.before_value(value);
                walk(value, visitor);
            }
            visitor.on_container_end(Container::Mapping(mapping));
        }
    }
}
