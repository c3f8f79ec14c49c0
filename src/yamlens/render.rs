//! Block and compact rendering of event/token sequences
//!
//!     Both renderers consume any [Record] sequence and write to an explicit
//!     sink, so output can be captured in memory for tests instead of going
//!     through process stdout.
//!
//!     Block layout: one header line per record (`- Event: SCALAR`), indented
//!     `Field: value` lines for each populated field, then a blank line.
//!
//!     Compact layout: one flow record per line (`- {Event: SCALAR, ...}`),
//!     no blank lines, a single trailing newline after the final record and
//!     nothing at all for an empty run. The "emitted anything yet" flag
//!     spans documents, so a multi-document stream still renders as one
//!     uninterrupted list.

use std::io::{self, Write};

use crate::yamlens::node::Span;

/// One populated, display-ready field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub text: String,
}

impl Field {
    pub fn new(name: &'static str, text: String) -> Self {
        Self { name, text }
    }
}

/// A renderable record: an event or a token.
pub trait Record {
    /// The header label: `"Event"` or `"Token"`.
    fn kind(&self) -> &'static str;

    /// The record's type name, e.g. `MAPPING-START`.
    fn type_name(&self) -> String;

    /// Populated fields in render order. Position is included only when
    /// `profuse` is set.
    fn fields(&self, profuse: bool) -> Vec<Field>;
}

/// Double-quote `text`, escaping embedded quotes and control characters.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.extend(c.escape_unicode()),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Render a span as `{line: col}` for a point or `{line: col, line: col}`
/// for a range.
pub fn span_text(span: &Span) -> String {
    if span.is_point() {
        format!("{{{}: {}}}", span.start.line, span.start.column)
    } else {
        format!(
            "{{{}: {}, {}: {}}}",
            span.start.line, span.start.column, span.end.line, span.end.column
        )
    }
}

/// Verbose one-record-per-block renderer.
pub struct BlockRenderer<W: Write> {
    out: W,
    profuse: bool,
}

impl<W: Write> BlockRenderer<W> {
    pub fn new(out: W, profuse: bool) -> Self {
        Self { out, profuse }
    }

    /// Render one document's records, a blank line after each.
    pub fn render<R: Record>(&mut self, records: &[R]) -> io::Result<()> {
        for record in records {
            writeln!(self.out, "- {}: {}", record.kind(), record.type_name())?;
            for field in record.fields(self.profuse) {
                writeln!(self.out, "  {}: {}", field.name, field.text)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

/// Flow-style one-record-per-line renderer.
pub struct CompactRenderer<W: Write> {
    out: W,
    profuse: bool,
    started: bool,
}

impl<W: Write> CompactRenderer<W> {
    pub fn new(out: W, profuse: bool) -> Self {
        Self {
            out,
            profuse,
            started: false,
        }
    }

    /// Render one document's records. Call [finish](Self::finish) once after
    /// the last document to terminate the final line.
    pub fn render<R: Record>(&mut self, records: &[R]) -> io::Result<()> {
        for record in records {
            if self.started {
                writeln!(self.out)?;
            }
            self.started = true;

            write!(self.out, "- {{{}: {}", record.kind(), record.type_name())?;
            for field in record.fields(self.profuse) {
                write!(self.out, ", {}: {}", field.name, field.text)?;
            }
            write!(self.out, "}}")?;
        }
        Ok(())
    }

    /// Terminate the final record line. Writes nothing when no record was
    /// ever rendered.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.started {
            writeln!(self.out)?;
        }
        Ok(())
    }
}
