//! Generic document tree - the input contract of the linearization engine
//!
//!     A Node is the in-memory representation of one parsed document element.
//!     Trees are produced per document by an external decoder (see
//!     [source](super::source)), consumed read-only by the linearizers, and
//!     discarded after rendering. No Node is mutated during linearization.
//!
//!     Each variant carries only the fields meaningful to it. A Mapping holds
//!     ordered key/value pairs in document order, which encodes the
//!     "even-length flat child list" shape of libyaml-style trees directly in
//!     the type. An Alias has no children and no comments of its own; anchors
//!     are plain strings an alias must match within the same document.

/// A line/column position as reported by the decoder. 1-based for real
/// source positions; markers synthesized without a source location stay at
/// the zero default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A start/end position pair. End positions are derived, not stored on the
/// tree; see [resolve](super::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// A span whose start and end coincide.
    pub fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}

/// Comment text attached to a node, verbatim from the decoder (including
/// the leading `#`). Empty strings mean "no comment".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comments {
    /// Comment lines preceding the node.
    pub head: String,
    /// Trailing comment on the node's own line.
    pub line: String,
    /// Comment lines following the node, blank-line-separated.
    pub foot: String,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.line.is_empty() && self.foot.is_empty()
    }
}

pub(crate) static NO_COMMENTS: Comments = Comments {
    head: String::new(),
    line: String::new(),
    foot: String::new(),
};

/// Presentation style of a scalar or container. `Default` means the decoder
/// recorded no style; it formats to the empty string, not to `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Default,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
    Flow,
}

/// Type annotation of a node.
///
/// `Resolved` tags were inferred by the decoder; `Explicit` tags were
/// written by the document author. The distinction feeds the `implicit`
/// flag on events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    None,
    Resolved(String),
    Explicit(String),
}

impl Tag {
    pub const STR: &'static str = "tag:yaml.org,2002:str";
    pub const INT: &'static str = "tag:yaml.org,2002:int";
    pub const BOOL: &'static str = "tag:yaml.org,2002:bool";
    pub const NULL: &'static str = "tag:yaml.org,2002:null";
    pub const FLOAT: &'static str = "tag:yaml.org,2002:float";
    pub const TIMESTAMP: &'static str = "tag:yaml.org,2002:timestamp";
    pub const SEQ: &'static str = "tag:yaml.org,2002:seq";
    pub const MAP: &'static str = "tag:yaml.org,2002:map";

    pub fn is_explicit(&self) -> bool {
        matches!(self, Tag::Explicit(_))
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Tag::None => None,
            Tag::Resolved(uri) | Tag::Explicit(uri) => Some(uri),
        }
    }
}

/// One parsed document element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document(DocumentNode),
    Scalar(ScalarNode),
    Sequence(SequenceNode),
    Mapping(MappingNode),
    Alias(AliasNode),
}

/// Document root wrapper; exactly one child.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    pub root: Box<Node>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarNode {
    pub value: String,
    pub style: Style,
    pub tag: Tag,
    pub anchor: Option<String>,
    pub position: Position,
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceNode {
    pub items: Vec<Node>,
    pub style: Style,
    pub tag: Tag,
    pub anchor: Option<String>,
    pub position: Position,
    pub comments: Comments,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingNode {
    /// Key/value pairs in document order, never sorted.
    pub pairs: Vec<(Node, Node)>,
    pub style: Style,
    pub tag: Tag,
    pub anchor: Option<String>,
    pub position: Position,
    pub comments: Comments,
}

/// A reference to a previously defined anchor. Never expanded into the
/// aliased subtree by the linearizers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AliasNode {
    pub anchor: String,
    pub position: Position,
}

impl Node {
    /// Wrap a root node in a document.
    pub fn document(root: Node) -> Node {
        let position = root.position();
        Node::Document(DocumentNode {
            root: Box::new(root),
            position,
        })
    }

    /// A plain scalar with default metadata.
    pub fn scalar(value: impl Into<String>) -> Node {
        Node::Scalar(ScalarNode {
            value: value.into(),
            ..Default::default()
        })
    }

    pub fn sequence(items: Vec<Node>) -> Node {
        Node::Sequence(SequenceNode {
            items,
            ..Default::default()
        })
    }

    pub fn mapping(pairs: Vec<(Node, Node)>) -> Node {
        Node::Mapping(MappingNode {
            pairs,
            ..Default::default()
        })
    }

    pub fn alias(anchor: impl Into<String>) -> Node {
        Node::Alias(AliasNode {
            anchor: anchor.into(),
            position: Position::default(),
        })
    }

    /// The recorded start position of this node.
    pub fn position(&self) -> Position {
        match self {
            Node::Document(document) => document.position,
            Node::Scalar(scalar) => scalar.position,
            Node::Sequence(sequence) => sequence.position,
            Node::Mapping(mapping) => mapping.position,
            Node::Alias(alias) => alias.position,
        }
    }

    /// Comments attached to this node. Documents and aliases carry none of
    /// their own.
    pub fn comments(&self) -> &Comments {
        match self {
            Node::Scalar(scalar) => &scalar.comments,
            Node::Sequence(sequence) => &sequence.comments,
            Node::Mapping(mapping) => &mapping.comments,
            Node::Document(_) | Node::Alias(_) => &NO_COMMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_pairs_keep_document_order() {
        let mapping = Node::mapping(vec![
            (Node::scalar("zulu"), Node::scalar("1")),
            (Node::scalar("alpha"), Node::scalar("2")),
        ]);
        let Node::Mapping(mapping) = mapping else {
            panic!("expected mapping");
        };
        let keys: Vec<_> = mapping
            .pairs
            .iter()
            .map(|(key, _)| match key {
                Node::Scalar(scalar) => scalar.value.as_str(),
                _ => panic!("expected scalar key"),
            })
            .collect();
        assert_eq!(keys, ["zulu", "alpha"]);
    }

    #[test]
    fn alias_has_no_comments() {
        let alias = Node::alias("name");
        assert!(alias.comments().is_empty());
    }

    #[test]
    fn document_adopts_root_position() {
        let root = Node::Scalar(ScalarNode {
            value: "x".into(),
            position: Position::new(3, 5),
            ..Default::default()
        });
        assert_eq!(Node::document(root).position(), Position::new(3, 5));
    }
}
