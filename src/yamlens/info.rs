//! Node mode - a YAML rendering of the tree itself
//!
//!     [NodeInfo] is the serializable mirror of a document tree: one record
//!     per node with its kind, text, presentation metadata and children,
//!     empty fields omitted. Mapping children are flattened to the
//!     alternating key/value order of the document, which keeps the listing
//!     close to what libyaml-style parsers hold in memory.

use serde::Serialize;

use crate::yamlens::format::{format_style, format_tag};
use crate::yamlens::node::{Node, Tag};

/// Serializable description of one node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeInfo {
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub anchor: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub head: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub foot: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<NodeInfo>,
}

impl NodeInfo {
    pub fn from_node(node: &Node) -> Self {
        let comments = node.comments();
        let mut info = NodeInfo {
            head: comments.head.clone(),
            line: comments.line.clone(),
            foot: comments.foot.clone(),
            ..Default::default()
        };

        match node {
            Node::Document(document) => {
                info.kind = "Document".into();
                info.content = vec![NodeInfo::from_node(&document.root)];
            }
            Node::Scalar(scalar) => {
                info.kind = "Scalar".into();
                info.text = scalar.value.clone();
                info.style = format_style(scalar.style).into();
                info.tag = explicit_tag(&scalar.tag);
                info.anchor = scalar.anchor.clone().unwrap_or_default();
            }
            Node::Sequence(sequence) => {
                info.kind = "Sequence".into();
                info.style = format_style(sequence.style).into();
                info.tag = explicit_tag(&sequence.tag);
                info.anchor = sequence.anchor.clone().unwrap_or_default();
                info.content = sequence.items.iter().map(NodeInfo::from_node).collect();
            }
            Node::Mapping(mapping) => {
                info.kind = "Mapping".into();
                info.style = format_style(mapping.style).into();
                info.tag = explicit_tag(&mapping.tag);
                info.anchor = mapping.anchor.clone().unwrap_or_default();
                for (key, value) in &mapping.pairs {
                    info.content.push(NodeInfo::from_node(key));
                    info.content.push(NodeInfo::from_node(value));
                }
            }
            Node::Alias(alias) => {
                info.kind = "Alias".into();
                info.text = format!("*{}", alias.anchor);
                info.anchor = alias.anchor.clone();
            }
        }
        info
    }
}

// Resolved tags restate what the text already shows; only author-written
// tags are worth a line in the listing.
fn explicit_tag(tag: &Tag) -> String {
    if tag.is_explicit() {
        format_tag(tag)
    } else {
        String::new()
    }
}
