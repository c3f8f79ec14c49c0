//! Structural event linearization
//!
//!     [linearize] turns one document tree into the ordered event sequence
//!     describing its shape: an outer DOCUMENT-START/DOCUMENT-END pair, one
//!     SCALAR event per scalar or alias, and a start/end pair per container.
//!     For a tree with S scalars/aliases, Q sequences and M mappings the
//!     sequence is exactly `2 + S + 2Q + 2M` events long.
//!
//!     Aliases are represented, never expanded: the alias site becomes a
//!     SCALAR event whose value is `*` plus the referenced anchor name.

use std::fmt;

use crate::yamlens::format::{format_style, format_tag};
use crate::yamlens::node::{AliasNode, Comments, Node, Position, ScalarNode, Span};
use crate::yamlens::render::{quote, span_text, Field, Record};
use crate::yamlens::resolve;
use crate::yamlens::visit::{walk, Container, Visit};

/// The type of a structural event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    DocumentStart,
    DocumentEnd,
    Scalar,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::DocumentStart => "DOCUMENT-START",
            EventType::DocumentEnd => "DOCUMENT-END",
            EventType::Scalar => "SCALAR",
            EventType::SequenceStart => "SEQUENCE-START",
            EventType::SequenceEnd => "SEQUENCE-END",
            EventType::MappingStart => "MAPPING-START",
            EventType::MappingEnd => "MAPPING-END",
        };
        f.write_str(name)
    }
}

/// One structural event. Style and tag carry their display forms; empty
/// strings mean the field is unset and is omitted from rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub value: String,
    pub anchor: String,
    pub tag: String,
    pub style: String,
    /// True when the node's type was inferred rather than explicitly tagged.
    pub implicit: bool,
    pub span: Span,
    pub comments: Comments,
}

impl Event {
    fn marker(event_type: EventType, position: Position) -> Self {
        Self {
            event_type,
            value: String::new(),
            anchor: String::new(),
            tag: String::new(),
            style: String::new(),
            implicit: true,
            span: Span::point(position),
            comments: Comments::default(),
        }
    }
}

impl Record for Event {
    fn kind(&self) -> &'static str {
        "Event"
    }

    fn type_name(&self) -> String {
        self.event_type.to_string()
    }

    fn fields(&self, profuse: bool) -> Vec<Field> {
        let mut fields = Vec::new();
        if !self.value.is_empty() {
            fields.push(Field::new("Value", quote(&self.value)));
        }
        if !self.style.is_empty() {
            fields.push(Field::new("Style", self.style.clone()));
        }
        if !self.tag.is_empty() {
            fields.push(Field::new("Tag", self.tag.clone()));
        }
        if !self.anchor.is_empty() {
            fields.push(Field::new("Anchor", self.anchor.clone()));
        }
        if !self.comments.head.is_empty() {
            fields.push(Field::new("Head", quote(&self.comments.head)));
        }
        if !self.comments.line.is_empty() {
            fields.push(Field::new("Line", quote(&self.comments.line)));
        }
        if !self.comments.foot.is_empty() {
            fields.push(Field::new("Foot", quote(&self.comments.foot)));
        }
        if profuse {
            fields.push(Field::new("Pos", span_text(&self.span)));
        }
        fields
    }
}

struct EventBuilder {
    events: Vec<Event>,
}

impl Visit for EventBuilder {
    fn on_scalar(&mut self, scalar: &ScalarNode) {
        self.events.push(Event {
            event_type: EventType::Scalar,
            value: scalar.value.clone(),
            anchor: scalar.anchor.clone().unwrap_or_default(),
            tag: format_tag(&scalar.tag),
            style: format_style(scalar.style).to_string(),
            implicit: !scalar.tag.is_explicit(),
            span: resolve::scalar_span(scalar.position, &scalar.value),
            comments: scalar.comments.clone(),
        });
    }

    fn on_alias(&mut self, alias: &AliasNode) {
        let value = format!("*{}", alias.anchor);
        self.events.push(Event {
            event_type: EventType::Scalar,
            span: resolve::scalar_span(alias.position, &value),
            value,
            anchor: alias.anchor.clone(),
            tag: String::new(),
            style: String::new(),
            implicit: true,
            comments: Comments::default(),
        });
    }

    fn on_container_start(&mut self, container: Container<'_>) {
        let event_type = match container {
            Container::Sequence(_) => EventType::SequenceStart,
            Container::Mapping(_) => EventType::MappingStart,
        };
        self.events.push(Event {
            event_type,
            value: String::new(),
            anchor: container.anchor().unwrap_or_default().to_string(),
            tag: format_tag(container.tag()),
            style: format_style(container.style()).to_string(),
            implicit: !container.tag().is_explicit(),
            span: Span::point(container.position()),
            comments: container.comments().clone(),
        });
    }

    fn on_container_end(&mut self, container: Container<'_>) {
        let event_type = match container {
            Container::Sequence(_) => EventType::SequenceEnd,
            Container::Mapping(_) => EventType::MappingEnd,
        };
        self.events.push(Event::marker(event_type, container.position()));
    }
}

/// Linearize one document tree into its ordered event sequence.
///
/// The outer DOCUMENT-START/DOCUMENT-END pair always brackets the root's
/// own structural events, whether or not `document` is itself a Document
/// node.
pub fn linearize(document: &Node) -> Vec<Event> {
    let position = document.position();
    let mut builder = EventBuilder { events: Vec::new() };
    builder
        .events
        .push(Event::marker(EventType::DocumentStart, position));
    walk(document, &mut builder);
    builder
        .events
        .push(Event::marker(EventType::DocumentEnd, position));
    builder.events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(events: &[Event]) -> Vec<EventType> {
        events.iter().map(|event| event.event_type).collect()
    }

    #[test]
    fn key_value_mapping_linearizes_in_order() {
        let tree = Node::document(Node::mapping(vec![(
            Node::scalar("key"),
            Node::scalar("value"),
        )]));
        let events = linearize(&tree);

        assert_eq!(
            types(&events),
            [
                EventType::DocumentStart,
                EventType::MappingStart,
                EventType::Scalar,
                EventType::Scalar,
                EventType::MappingEnd,
                EventType::DocumentEnd,
            ]
        );
        assert_eq!(events[2].value, "key");
        assert_eq!(events[3].value, "value");
    }

    #[test]
    fn alias_becomes_scalar_event_without_expansion() {
        let tree = Node::document(Node::sequence(vec![
            Node::Scalar(ScalarNode {
                value: "John Doe".into(),
                anchor: Some("name".into()),
                ..Default::default()
            }),
            Node::alias("name"),
        ]));
        let events = linearize(&tree);

        let alias_event = &events[3];
        assert_eq!(alias_event.event_type, EventType::Scalar);
        assert_eq!(alias_event.value, "*name");
        assert_eq!(alias_event.anchor, "name");
        // The aliased text never leaks into the alias event.
        assert_ne!(alias_event.value, "John Doe");
    }

    #[test]
    fn document_markers_always_bracket_the_sequence() {
        let bare_scalar = Node::scalar("lonely");
        let events = linearize(&bare_scalar);
        assert_eq!(events.first().unwrap().event_type, EventType::DocumentStart);
        assert_eq!(events.last().unwrap().event_type, EventType::DocumentEnd);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn explicit_tag_clears_the_implicit_flag() {
        use crate::yamlens::node::Tag;
        let tree = Node::document(Node::Scalar(ScalarNode {
            value: "x".into(),
            tag: Tag::Explicit("!custom".into()),
            ..Default::default()
        }));
        let events = linearize(&tree);
        assert!(!events[1].implicit);
        assert_eq!(events[1].tag, "!custom");
    }
}
