//! Document sources - where trees come from
//!
//!     The engine is specified against the [Node](super::node) contract; any
//!     front end that produces trees can drive it. [YamlSource] is the
//!     bundled front end, built on serde_yaml's multi-document deserializer.
//!     It fills in structure and resolved tags; serde_yaml resolves aliases
//!     during decoding and exposes no comments or source positions, so those
//!     fields are left at their defaults and are populated only by richer
//!     front ends or directly constructed trees.
//!
//!     [TreeSource] serves programmatic callers (and the tests): it hands
//!     out a fixed list of already-built documents.

use std::fmt;

use serde::Deserialize;
use serde_yaml::Value;

use crate::yamlens::node::{MappingNode, Node, ScalarNode, SequenceNode, Tag};

/// Failure to decode an input document. Fatal: the driver stops at the
/// document where it occurs.
#[derive(Debug, Clone)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode YAML: {}", self.message)
    }
}

impl std::error::Error for DecodeError {}

/// A pull-based supply of document trees.
pub trait DocumentSource {
    /// The next document, or `None` when the stream is exhausted.
    fn next_document(&mut self) -> Result<Option<Node>, DecodeError>;
}

/// Documents decoded from YAML text via serde_yaml.
pub struct YamlSource<'a> {
    documents: Option<serde_yaml::Deserializer<'a>>,
}

impl<'a> YamlSource<'a> {
    pub fn new(input: &'a str) -> Self {
        // serde_yaml reads a contentless stream as one null document; a
        // stream with nothing but blank and comment lines holds zero
        // documents and must yield none. A lone `---` is still content:
        // an explicit empty document.
        let has_content = input.lines().any(|line| {
            let line = line.trim_start();
            !line.is_empty() && !line.starts_with('#')
        });
        let documents = if has_content {
            Some(serde_yaml::Deserializer::from_str(input))
        } else {
            None
        };
        Self { documents }
    }
}

impl DocumentSource for YamlSource<'_> {
    fn next_document(&mut self) -> Result<Option<Node>, DecodeError> {
        let Some(documents) = self.documents.as_mut() else {
            return Ok(None);
        };
        match documents.next() {
            None => Ok(None),
            Some(document) => {
                let value = Value::deserialize(document)
                    .map_err(|error| DecodeError::new(error.to_string()))?;
                Ok(Some(Node::document(node_from_value(value))))
            }
        }
    }
}

/// A fixed list of pre-built documents.
pub struct TreeSource {
    documents: std::vec::IntoIter<Node>,
}

impl TreeSource {
    pub fn new(documents: Vec<Node>) -> Self {
        Self {
            documents: documents.into_iter(),
        }
    }
}

impl DocumentSource for TreeSource {
    fn next_document(&mut self) -> Result<Option<Node>, DecodeError> {
        Ok(self.documents.next())
    }
}

fn resolved_scalar(value: String, tag: &'static str) -> Node {
    Node::Scalar(ScalarNode {
        value,
        tag: Tag::Resolved(tag.to_string()),
        ..Default::default()
    })
}

fn node_from_value(value: Value) -> Node {
    match value {
        Value::Null => resolved_scalar("null".to_string(), Tag::NULL),
        Value::Bool(b) => resolved_scalar(b.to_string(), Tag::BOOL),
        Value::Number(number) => {
            let tag = if number.is_f64() { Tag::FLOAT } else { Tag::INT };
            resolved_scalar(number.to_string(), tag)
        }
        Value::String(text) => resolved_scalar(text, Tag::STR),
        Value::Sequence(items) => Node::Sequence(SequenceNode {
            items: items.into_iter().map(node_from_value).collect(),
            tag: Tag::Resolved(Tag::SEQ.to_string()),
            ..Default::default()
        }),
        Value::Mapping(mapping) => Node::Mapping(MappingNode {
            pairs: mapping
                .into_iter()
                .map(|(key, value)| (node_from_value(key), node_from_value(value)))
                .collect(),
            tag: Tag::Resolved(Tag::MAP.to_string()),
            ..Default::default()
        }),
        Value::Tagged(tagged) => {
            let mut node = node_from_value(tagged.value);
            set_explicit_tag(&mut node, tagged.tag.to_string());
            node
        }
    }
}

fn set_explicit_tag(node: &mut Node, tag: String) {
    match node {
        Node::Scalar(scalar) => scalar.tag = Tag::Explicit(tag),
        Node::Sequence(sequence) => sequence.tag = Tag::Explicit(tag),
        Node::Mapping(mapping) => mapping.tag = Tag::Explicit(tag),
        Node::Document(_) | Node::Alias(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(input: &str) -> Vec<Node> {
        let mut source = YamlSource::new(input);
        let mut documents = Vec::new();
        while let Some(document) = source.next_document().unwrap() {
            documents.push(document);
        }
        documents
    }

    fn root(document: &Node) -> &Node {
        match document {
            Node::Document(document) => &document.root,
            other => other,
        }
    }

    #[test]
    fn empty_input_yields_no_documents() {
        assert!(decode_all("").is_empty());
        assert!(decode_all("   \n").is_empty());
    }

    #[test]
    fn comment_only_stream_yields_no_documents() {
        assert!(decode_all("# just a comment\n").is_empty());
        assert!(decode_all("# one\n\n  # two\n").is_empty());
    }

    #[test]
    fn explicit_document_marker_is_still_content() {
        let documents = decode_all("---\n");
        assert_eq!(documents.len(), 1);
        let Node::Scalar(scalar) = root(&documents[0]) else {
            panic!("expected scalar root");
        };
        assert_eq!(scalar.tag, Tag::Resolved(Tag::NULL.to_string()));
    }

    #[test]
    fn mapping_decodes_with_resolved_tags() {
        let documents = decode_all("key: value\ncount: 3");
        assert_eq!(documents.len(), 1);
        let Node::Mapping(mapping) = root(&documents[0]) else {
            panic!("expected mapping root");
        };
        assert_eq!(mapping.pairs.len(), 2);
        let Node::Scalar(value) = &mapping.pairs[0].1 else {
            panic!("expected scalar value");
        };
        assert_eq!(value.value, "value");
        assert_eq!(value.tag, Tag::Resolved(Tag::STR.to_string()));
        let Node::Scalar(count) = &mapping.pairs[1].1 else {
            panic!("expected scalar value");
        };
        assert_eq!(count.tag, Tag::Resolved(Tag::INT.to_string()));
    }

    #[test]
    fn multi_document_streams_decode_in_order() {
        let documents = decode_all("first: 1\n---\nsecond: 2\n");
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn explicit_tags_survive_decoding() {
        let documents = decode_all("!thing\nkind: widget\n");
        let Node::Mapping(mapping) = root(&documents[0]) else {
            panic!("expected mapping root");
        };
        assert!(mapping.tag.is_explicit());
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let mut source = YamlSource::new("key: [unclosed");
        assert!(source.next_document().is_err());
    }

    #[test]
    fn null_decodes_to_null_scalar() {
        let documents = decode_all("~");
        let Node::Scalar(scalar) = root(&documents[0]) else {
            panic!("expected scalar root");
        };
        assert_eq!(scalar.value, "null");
        assert_eq!(scalar.tag, Tag::Resolved(Tag::NULL.to_string()));
    }
}
