//! Document stream driver - one entry point per output mode
//!
//!     Each `process_*` function pulls documents one at a time, projects
//!     them, and writes to an explicit sink. Processing is strictly
//!     sequential: a document is fully decoded, linearized and rendered
//!     before the next one is touched. Any decode or encode failure aborts
//!     the run at that document; output already written for earlier
//!     documents stays on the sink.
//!
//!     Document separators: node mode and the YAML modes write a literal
//!     `---` line between consecutive documents. Event and token modes use
//!     the renderer's own record separators, and JSON mode is
//!     newline-delimited.

use std::fmt;
use std::io::{self, Write};

use serde::Deserialize;
use serde_yaml::Value;

use crate::yamlens::emit;
use crate::yamlens::event;
use crate::yamlens::info::NodeInfo;
use crate::yamlens::node::{Node, ScalarNode, Tag};
use crate::yamlens::render::{BlockRenderer, CompactRenderer};
use crate::yamlens::source::{DecodeError, DocumentSource};
use crate::yamlens::token;

/// Driver-level failure, tagged by stage so input-data problems are
/// distinguishable from output-representation problems.
#[derive(Debug)]
pub enum ProcessError {
    Decode(DecodeError),
    Encode(String),
    Io(io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Decode(error) => write!(f, "{error}"),
            ProcessError::Encode(message) => write!(f, "failed to encode: {message}"),
            ProcessError::Io(error) => write!(f, "output error: {error}"),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Decode(error) => Some(error),
            ProcessError::Encode(_) => None,
            ProcessError::Io(error) => Some(error),
        }
    }
}

impl From<DecodeError> for ProcessError {
    fn from(error: DecodeError) -> Self {
        ProcessError::Decode(error)
    }
}

impl From<io::Error> for ProcessError {
    fn from(error: io::Error) -> Self {
        ProcessError::Io(error)
    }
}

/// Render every document's event sequence.
pub fn process_events(
    source: &mut dyn DocumentSource,
    profuse: bool,
    compact: bool,
    out: &mut dyn Write,
) -> Result<(), ProcessError> {
    if compact {
        let mut renderer = CompactRenderer::new(&mut *out, profuse);
        while let Some(document) = source.next_document()? {
            renderer.render(&event::linearize(&document))?;
        }
        renderer.finish()?;
    } else {
        let mut renderer = BlockRenderer::new(&mut *out, profuse);
        while let Some(document) = source.next_document()? {
            renderer.render(&event::linearize(&document))?;
        }
    }
    Ok(())
}

/// Render every document's token sequence.
pub fn process_tokens(
    source: &mut dyn DocumentSource,
    profuse: bool,
    compact: bool,
    out: &mut dyn Write,
) -> Result<(), ProcessError> {
    if compact {
        let mut renderer = CompactRenderer::new(&mut *out, profuse);
        while let Some(document) = source.next_document()? {
            renderer.render(&token::linearize(&document))?;
        }
        renderer.finish()?;
    } else {
        let mut renderer = BlockRenderer::new(&mut *out, profuse);
        while let Some(document) = source.next_document()? {
            renderer.render(&token::linearize(&document))?;
        }
    }
    Ok(())
}

/// Render every document's tree as a YAML node-info listing.
pub fn process_nodes(
    source: &mut dyn DocumentSource,
    out: &mut dyn Write,
) -> Result<(), ProcessError> {
    let mut first = true;
    while let Some(document) = source.next_document()? {
        if !first {
            writeln!(out, "---")?;
        }
        first = false;

        let info = NodeInfo::from_node(&document);
        let rendered =
            serde_yaml::to_string(&info).map_err(|error| ProcessError::Encode(error.to_string()))?;
        write!(out, "{rendered}")?;
    }
    Ok(())
}

/// Re-serialize the stream as YAML: normalized through generic data, or
/// presentation-preserving from the trees themselves.
pub fn process_yaml(
    source: &mut dyn DocumentSource,
    preserve: bool,
    out: &mut dyn Write,
) -> Result<(), ProcessError> {
    let mut first = true;
    while let Some(document) = source.next_document()? {
        if !first {
            writeln!(out, "---")?;
        }
        first = false;

        if preserve {
            emit::emit_document(&document, out)?;
        } else {
            let value = generic_value(&document);
            let rendered = serde_yaml::to_string(&value)
                .map_err(|error| ProcessError::Encode(error.to_string()))?;
            write!(out, "{rendered}")?;
        }
    }
    Ok(())
}

/// Encode every document as JSON, one text per line. Pretty mode indents
/// by two spaces.
pub fn process_json(input: &str, pretty: bool, out: &mut dyn Write) -> Result<(), ProcessError> {
    if input.trim().is_empty() {
        return Ok(());
    }
    for document in serde_yaml::Deserializer::from_str(input) {
        let value = Value::deserialize(document)
            .map_err(|error| ProcessError::Decode(DecodeError::new(error.to_string())))?;
        let rendered = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .map_err(|error| ProcessError::Encode(error.to_string()))?;
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}

// Strip presentation: only structure and resolved types survive into the
// generic value. Aliases keep their reference text, since no anchor table
// is available here.
fn generic_value(node: &Node) -> Value {
    match node {
        Node::Document(document) => generic_value(&document.root),
        Node::Scalar(scalar) => scalar_value(scalar),
        Node::Alias(alias) => Value::String(format!("*{}", alias.anchor)),
        Node::Sequence(sequence) => {
            Value::Sequence(sequence.items.iter().map(generic_value).collect())
        }
        Node::Mapping(mapping) => {
            let mut out = serde_yaml::Mapping::new();
            for (key, value) in &mapping.pairs {
                out.insert(generic_value(key), generic_value(value));
            }
            Value::Mapping(out)
        }
    }
}

fn scalar_value(scalar: &ScalarNode) -> Value {
    match scalar.tag.uri() {
        Some(Tag::NULL) => Value::Null,
        Some(Tag::BOOL) => match scalar.value.parse::<bool>() {
            Ok(flag) => Value::Bool(flag),
            Err(_) => Value::String(scalar.value.clone()),
        },
        Some(Tag::INT) => match scalar.value.parse::<i64>() {
            Ok(number) => Value::Number(number.into()),
            Err(_) => Value::String(scalar.value.clone()),
        },
        Some(Tag::FLOAT) => match scalar.value.parse::<f64>() {
            Ok(number) => Value::Number(number.into()),
            Err(_) => Value::String(scalar.value.clone()),
        },
        _ => Value::String(scalar.value.clone()),
    }
}
