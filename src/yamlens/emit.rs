//! Style/comment-preserving YAML emission
//!
//!     The normalized YAML mode round-trips through generic data and loses
//!     presentation; this emitter writes a document back out from its Node
//!     tree instead, keeping comments, quoting styles, block scalars,
//!     anchors and aliases. Output is block-form with two-space indentation;
//!     containers decoded in flow style are re-emitted in flow style.

use std::io::{self, Write};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::yamlens::node::{Comments, Node, ScalarNode, Style, Tag};
use crate::yamlens::render::quote;

// Values that can be written without quotes: no leading/trailing space, no
// YAML indicator characters, no colon-space or comment ambiguity.
static PLAIN_SAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_./][A-Za-z0-9_./@+()\- ]*[A-Za-z0-9_./@+()]$|^[A-Za-z0-9_./]$").unwrap());

static LOOKS_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(true|false|null|~|yes|no|on|off)$").unwrap());

/// Emit one document tree as YAML, preserving presentation metadata.
pub fn emit_document(document: &Node, out: &mut dyn Write) -> io::Result<()> {
    let root = match document {
        Node::Document(document) => &*document.root,
        other => other,
    };
    emit_node(root, 0, out)
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

fn write_comment_block(text: &str, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    for line in text.lines() {
        if line.starts_with('#') {
            writeln!(out, "{}{}", pad(indent), line)?;
        } else {
            writeln!(out, "{}# {}", pad(indent), line)?;
        }
    }
    Ok(())
}

fn head(comments: &Comments, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    write_comment_block(&comments.head, indent, out)
}

fn foot(comments: &Comments, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    write_comment_block(&comments.foot, indent, out)
}

// Trailing same-line comment, with the leading space that separates it
// from the content.
fn line_suffix(comments: &Comments) -> String {
    let line = comments.line.trim_end();
    if line.is_empty() {
        String::new()
    } else if line.starts_with('#') {
        format!(" {line}")
    } else {
        format!(" # {line}")
    }
}

fn anchor_prefix(anchor: Option<&str>) -> String {
    match anchor {
        Some(name) => format!("&{name} "),
        None => String::new(),
    }
}

fn is_string_tagged(tag: &Tag) -> bool {
    match tag.uri() {
        None => true,
        Some(uri) => uri == Tag::STR || uri == "!!str",
    }
}

fn needs_quoting(scalar: &ScalarNode) -> bool {
    let value = &scalar.value;
    if value.is_empty() || !PLAIN_SAFE.is_match(value) {
        return true;
    }
    // A plain "true" or "30" would resolve to the wrong type on re-read.
    is_string_tagged(&scalar.tag)
        && (LOOKS_SPECIAL.is_match(value) || value.parse::<f64>().is_ok())
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn scalar_inline(scalar: &ScalarNode) -> String {
    match scalar.style {
        Style::SingleQuoted => single_quote(&scalar.value),
        Style::DoubleQuoted => quote(&scalar.value),
        _ => {
            if scalar.value.contains('\n') {
                quote(&scalar.value)
            } else if needs_quoting(scalar) {
                single_quote(&scalar.value)
            } else {
                scalar.value.clone()
            }
        }
    }
}

fn uses_block_form(scalar: &ScalarNode) -> bool {
    match scalar.style {
        Style::Literal | Style::Folded => true,
        Style::SingleQuoted | Style::DoubleQuoted => false,
        _ => scalar.value.contains('\n'),
    }
}

/// Render a node on a single line, when possible.
fn inline_text(node: &Node) -> Option<String> {
    match node {
        Node::Scalar(scalar) => {
            if uses_block_form(scalar) {
                None
            } else {
                Some(format!(
                    "{}{}",
                    anchor_prefix(scalar.anchor.as_deref()),
                    scalar_inline(scalar)
                ))
            }
        }
        Node::Alias(alias) => Some(format!("*{}", alias.anchor)),
        Node::Sequence(sequence) => {
            if sequence.style == Style::Flow || sequence.items.is_empty() {
                Some(flow_text(node))
            } else {
                None
            }
        }
        Node::Mapping(mapping) => {
            if mapping.style == Style::Flow || mapping.pairs.is_empty() {
                Some(flow_text(node))
            } else {
                None
            }
        }
        Node::Document(_) => None,
    }
}

fn flow_text(node: &Node) -> String {
    match node {
        Node::Document(document) => flow_text(&document.root),
        Node::Scalar(scalar) => format!(
            "{}{}",
            anchor_prefix(scalar.anchor.as_deref()),
            scalar_inline(scalar)
        ),
        Node::Alias(alias) => format!("*{}", alias.anchor),
        Node::Sequence(sequence) => {
            let items: Vec<_> = sequence.items.iter().map(flow_text).collect();
            format!(
                "{}[{}]",
                anchor_prefix(sequence.anchor.as_deref()),
                items.join(", ")
            )
        }
        Node::Mapping(mapping) => {
            let pairs: Vec<_> = mapping
                .pairs
                .iter()
                .map(|(key, value)| format!("{}: {}", flow_text(key), flow_text(value)))
                .collect();
            format!(
                "{}{{{}}}",
                anchor_prefix(mapping.anchor.as_deref()),
                pairs.join(", ")
            )
        }
    }
}

// Header plus indented content lines for `|` and `>` scalars. The caller
// has already written everything up to the header position.
fn emit_block_scalar(
    scalar: &ScalarNode,
    content_indent: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    let header = match scalar.style {
        Style::Folded => '>',
        _ => '|',
    };
    let chomp = if scalar.value.ends_with('\n') { "" } else { "-" };
    writeln!(
        out,
        "{}{}{}{}",
        anchor_prefix(scalar.anchor.as_deref()),
        header,
        chomp,
        line_suffix(&scalar.comments)
    )?;
    for line in scalar.value.lines() {
        if line.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "{}{}", pad(content_indent), line)?;
        }
    }
    Ok(())
}

fn emit_node(node: &Node, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    match node {
        Node::Document(document) => emit_node(&document.root, indent, out),
        Node::Scalar(scalar) => {
            head(&scalar.comments, indent, out)?;
            if uses_block_form(scalar) {
                write!(out, "{}", pad(indent))?;
                emit_block_scalar(scalar, indent + 1, out)?;
            } else {
                writeln!(
                    out,
                    "{}{}{}{}",
                    pad(indent),
                    anchor_prefix(scalar.anchor.as_deref()),
                    scalar_inline(scalar),
                    line_suffix(&scalar.comments)
                )?;
            }
            foot(&scalar.comments, indent, out)
        }
        Node::Alias(alias) => writeln!(out, "{}*{}", pad(indent), alias.anchor),
        Node::Sequence(sequence) => {
            head(&sequence.comments, indent, out)?;
            if let Some(text) = inline_text(node) {
                writeln!(out, "{}{}{}", pad(indent), text, line_suffix(&sequence.comments))?;
            } else {
                if let Some(name) = sequence.anchor.as_deref() {
                    writeln!(out, "{}&{}", pad(indent), name)?;
                }
                emit_container_body(node, indent, out)?;
            }
            foot(&sequence.comments, indent, out)
        }
        Node::Mapping(mapping) => {
            head(&mapping.comments, indent, out)?;
            if let Some(text) = inline_text(node) {
                writeln!(out, "{}{}{}", pad(indent), text, line_suffix(&mapping.comments))?;
            } else {
                if let Some(name) = mapping.anchor.as_deref() {
                    writeln!(out, "{}&{}", pad(indent), name)?;
                }
                emit_container_body(node, indent, out)?;
            }
            foot(&mapping.comments, indent, out)
        }
    }
}

// Items or pairs of a block container, without the container's own head
// comments or anchor (the caller placed those).
fn emit_container_body(node: &Node, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    match node {
        Node::Sequence(sequence) => {
            for item in &sequence.items {
                emit_sequence_item(item, indent, out)?;
            }
            Ok(())
        }
        Node::Mapping(mapping) => {
            for (key, value) in &mapping.pairs {
                emit_pair(key, value, indent, out)?;
            }
            Ok(())
        }
        other => emit_node(other, indent, out),
    }
}

fn emit_sequence_item(item: &Node, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    head(item.comments(), indent, out)?;
    if let Some(text) = inline_text(item) {
        writeln!(
            out,
            "{}- {}{}",
            pad(indent),
            text,
            line_suffix(item.comments())
        )?;
    } else {
        match item {
            Node::Scalar(scalar) => {
                write!(out, "{}- ", pad(indent))?;
                emit_block_scalar(scalar, indent + 1, out)?;
            }
            container => {
                let anchor = match container {
                    Node::Sequence(sequence) => sequence.anchor.as_deref(),
                    Node::Mapping(mapping) => mapping.anchor.as_deref(),
                    _ => None,
                };
                match anchor {
                    Some(name) => writeln!(out, "{}- &{}", pad(indent), name)?,
                    None => writeln!(out, "{}-", pad(indent))?,
                }
                emit_container_body(container, indent + 1, out)?;
            }
        }
    }
    foot(item.comments(), indent, out)
}

fn emit_pair(key: &Node, value: &Node, indent: usize, out: &mut dyn Write) -> io::Result<()> {
    head(key.comments(), indent, out)?;
    let key_text = inline_text(key).unwrap_or_else(|| flow_text(key));
    if let Some(text) = inline_text(value) {
        let suffix = {
            let from_value = line_suffix(value.comments());
            if from_value.is_empty() {
                line_suffix(key.comments())
            } else {
                from_value
            }
        };
        writeln!(out, "{}{}: {}{}", pad(indent), key_text, text, suffix)?;
        foot(value.comments(), indent, out)?;
    } else {
        match value {
            Node::Scalar(scalar) => {
                write!(out, "{}{}: ", pad(indent), key_text)?;
                emit_block_scalar(scalar, indent + 1, out)?;
            }
            container => {
                let anchor = match container {
                    Node::Sequence(sequence) => sequence.anchor.as_deref(),
                    Node::Mapping(mapping) => mapping.anchor.as_deref(),
                    _ => None,
                };
                let anchor_text = match anchor {
                    Some(name) => format!(" &{name}"),
                    None => String::new(),
                };
                writeln!(
                    out,
                    "{}{}:{}{}",
                    pad(indent),
                    key_text,
                    anchor_text,
                    line_suffix(key.comments())
                )?;
                head(container.comments(), indent + 1, out)?;
                emit_container_body(container, indent + 1, out)?;
            }
        }
    }
    foot(key.comments(), indent, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yamlens::node::{MappingNode, SequenceNode};

    fn emit(node: &Node) -> String {
        let mut out = Vec::new();
        emit_document(node, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_mapping_round_trips() {
        let tree = Node::document(Node::mapping(vec![
            (Node::scalar("key"), Node::scalar("value")),
            (
                Node::scalar("items"),
                Node::sequence(vec![Node::scalar("one"), Node::scalar("two")]),
            ),
        ]));
        assert_eq!(emit(&tree), "key: value\nitems:\n  - one\n  - two\n");
    }

    #[test]
    fn quoting_styles_are_preserved() {
        let tree = Node::mapping(vec![
            (
                Node::scalar("quoted"),
                Node::Scalar(ScalarNode {
                    value: "single".into(),
                    style: Style::SingleQuoted,
                    ..Default::default()
                }),
            ),
            (
                Node::scalar("double"),
                Node::Scalar(ScalarNode {
                    value: "double".into(),
                    style: Style::DoubleQuoted,
                    ..Default::default()
                }),
            ),
        ]);
        assert_eq!(emit(&tree), "quoted: 'single'\ndouble: \"double\"\n");
    }

    #[test]
    fn comments_are_preserved() {
        let tree = Node::mapping(vec![(
            Node::Scalar(ScalarNode {
                value: "key".into(),
                comments: Comments {
                    head: "# comment".into(),
                    line: "# inline".into(),
                    ..Default::default()
                },
                ..Default::default()
            }),
            Node::scalar("value"),
        )]);
        assert_eq!(emit(&tree), "# comment\nkey: value # inline\n");
    }

    #[test]
    fn anchors_and_aliases_are_preserved() {
        let tree = Node::mapping(vec![
            (
                Node::scalar("name"),
                Node::Scalar(ScalarNode {
                    value: "John Doe".into(),
                    anchor: Some("name".into()),
                    ..Default::default()
                }),
            ),
            (Node::scalar("aka"), Node::alias("name")),
        ]);
        assert_eq!(emit(&tree), "name: &name John Doe\naka: *name\n");
    }

    #[test]
    fn ambiguous_plain_strings_get_quoted() {
        let tree = Node::mapping(vec![
            (Node::scalar("zip"), Node::scalar("12345")),
            (Node::scalar("flag"), Node::scalar("true")),
        ]);
        assert_eq!(emit(&tree), "zip: '12345'\nflag: 'true'\n");
    }

    #[test]
    fn typed_scalars_stay_plain() {
        let tree = Node::mapping(vec![(
            Node::scalar("age"),
            Node::Scalar(ScalarNode {
                value: "30".into(),
                tag: Tag::Resolved(Tag::INT.to_string()),
                ..Default::default()
            }),
        )]);
        assert_eq!(emit(&tree), "age: 30\n");
    }

    #[test]
    fn literal_block_scalar_keeps_lines() {
        let tree = Node::mapping(vec![(
            Node::scalar("text"),
            Node::Scalar(ScalarNode {
                value: "line one\nline two\n".into(),
                style: Style::Literal,
                ..Default::default()
            }),
        )]);
        assert_eq!(emit(&tree), "text: |\n  line one\n  line two\n");
    }

    #[test]
    fn flow_containers_stay_flow() {
        let tree = Node::mapping(vec![(
            Node::scalar("features"),
            Node::Sequence(SequenceNode {
                items: vec![Node::scalar("one"), Node::scalar("two")],
                style: Style::Flow,
                ..Default::default()
            }),
        )]);
        assert_eq!(emit(&tree), "features: [one, two]\n");
    }

    #[test]
    fn empty_containers_render_inline() {
        let tree = Node::mapping(vec![
            (Node::scalar("empty_list"), Node::sequence(vec![])),
            (
                Node::scalar("empty_map"),
                Node::Mapping(MappingNode::default()),
            ),
        ]);
        assert_eq!(emit(&tree), "empty_list: []\nempty_map: {}\n");
    }

    #[test]
    fn nested_mapping_indents_by_two() {
        let tree = Node::mapping(vec![(
            Node::scalar("person"),
            Node::mapping(vec![
                (Node::scalar("name"), Node::scalar("Alice")),
                (Node::scalar("city"), Node::scalar("Anytown")),
            ]),
        )]);
        assert_eq!(emit(&tree), "person:\n  name: Alice\n  city: Anytown\n");
    }
}
