//! Token linearization
//!
//!     The token sequence is the finer-grained sibling of the event
//!     sequence: the same depth-first walk, but each document is additionally
//!     bracketed by STREAM-START/STREAM-END, containers use the block token
//!     names with a shared BLOCK-END, and KEY/VALUE/BLOCK-ENTRY pseudo-tokens
//!     precede each mapping key, mapping value and sequence element. The
//!     pseudo-tokens carry the position of the node they introduce.
//!
//!     Aliases surface as SCALAR tokens carrying the alias text, mirroring
//!     the event linearizer so the two sequences stay structurally
//!     comparable.

use std::fmt;

use crate::yamlens::format::format_style;
use crate::yamlens::node::{AliasNode, Comments, Node, Position, ScalarNode, Span};
use crate::yamlens::render::{quote, span_text, Field, Record};
use crate::yamlens::resolve;
use crate::yamlens::visit::{walk, Container, Visit};

/// The type of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    BlockMappingStart,
    BlockSequenceStart,
    BlockEntry,
    Key,
    Value,
    BlockEnd,
    Scalar,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::StreamStart => "STREAM-START",
            TokenType::StreamEnd => "STREAM-END",
            TokenType::DocumentStart => "DOCUMENT-START",
            TokenType::DocumentEnd => "DOCUMENT-END",
            TokenType::BlockMappingStart => "BLOCK-MAPPING-START",
            TokenType::BlockSequenceStart => "BLOCK-SEQUENCE-START",
            TokenType::BlockEntry => "BLOCK-ENTRY",
            TokenType::Key => "KEY",
            TokenType::Value => "VALUE",
            TokenType::BlockEnd => "BLOCK-END",
            TokenType::Scalar => "SCALAR",
        };
        f.write_str(name)
    }
}

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub style: String,
    pub span: Span,
    pub comments: Comments,
}

impl Token {
    fn marker(token_type: TokenType, position: Position) -> Self {
        Self {
            token_type,
            value: String::new(),
            style: String::new(),
            span: Span::point(position),
            comments: Comments::default(),
        }
    }
}

impl Record for Token {
    fn kind(&self) -> &'static str {
        "Token"
    }

    fn type_name(&self) -> String {
        self.token_type.to_string()
    }

    fn fields(&self, profuse: bool) -> Vec<Field> {
        let mut fields = Vec::new();
        if !self.value.is_empty() {
            fields.push(Field::new("Value", quote(&self.value)));
        }
        // Plain is the dominant scalar style; suppressing it keeps token
        // listings readable.
        if !self.style.is_empty() && self.style != "Plain" {
            fields.push(Field::new("Style", self.style.clone()));
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

struct TokenBuilder {
    tokens: Vec<Token>,
}

impl Visit for TokenBuilder {
    fn on_scalar(&mut self, scalar: &ScalarNode) {
        self.tokens.push(Token {
            token_type: TokenType::Scalar,
            value: scalar.value.clone(),
            style: format_style(scalar.style).to_string(),
            span: resolve::scalar_span(scalar.position, &scalar.value),
            comments: scalar.comments.clone(),
        });
    }

    fn on_alias(&mut self, alias: &AliasNode) {
        let value = format!("*{}", alias.anchor);
        self.tokens.push(Token {
            token_type: TokenType::Scalar,
            span: resolve::scalar_span(alias.position, &value),
            value,
            style: String::new(),
            comments: Comments::default(),
        });
    }

    fn on_container_start(&mut self, container: Container<'_>) {
        let token_type = match container {
            Container::Sequence(_) => TokenType::BlockSequenceStart,
            Container::Mapping(_) => TokenType::BlockMappingStart,
        };
        self.tokens.push(Token {
            token_type,
            value: String::new(),
            style: String::new(),
            span: Span::point(container.position()),
            comments: container.comments().clone(),
        });
    }

    fn on_container_end(&mut self, container: Container<'_>) {
        self.tokens
            .push(Token::marker(TokenType::BlockEnd, container.position()));
    }

    fn before_key(&mut self, key: &Node) {
        self.tokens.push(Token::marker(TokenType::Key, key.position()));
    }

    fn before_value(&mut self, value: &Node) {
        self.tokens
            .push(Token::marker(TokenType::Value, value.position()));
    }

    fn before_entry(&mut self, item: &Node) {
        self.tokens
            .push(Token::marker(TokenType::BlockEntry, item.position()));
    }
}

/// Linearize one document tree into its ordered token sequence, bracketed
/// by stream- and document-level markers.
pub fn linearize(document: &Node) -> Vec<Token> {
    let mut builder = TokenBuilder { tokens: Vec::new() };
    builder
        .tokens
        .push(Token::marker(TokenType::StreamStart, Position::default()));
    builder
        .tokens
        .push(Token::marker(TokenType::DocumentStart, Position::default()));
    walk(document, &mut builder);
    builder
        .tokens
        .push(Token::marker(TokenType::DocumentEnd, Position::default()));
    builder
        .tokens
        .push(Token::marker(TokenType::StreamEnd, Position::default()));
    builder.tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(|token| token.token_type).collect()
    }

    #[test]
    fn mapping_inserts_key_and_value_pseudo_tokens() {
        let tree = Node::document(Node::mapping(vec![(
            Node::scalar("key"),
            Node::scalar("value"),
        )]));
        let tokens = linearize(&tree);

        assert_eq!(
            types(&tokens),
            [
                TokenType::StreamStart,
                TokenType::DocumentStart,
                TokenType::BlockMappingStart,
                TokenType::Key,
                TokenType::Scalar,
                TokenType::Value,
                TokenType::Scalar,
                TokenType::BlockEnd,
                TokenType::DocumentEnd,
                TokenType::StreamEnd,
            ]
        );
    }

    #[test]
    fn sequence_entries_each_get_a_block_entry_marker() {
        let tree = Node::document(Node::mapping(vec![(
            Node::scalar("items"),
            Node::sequence(vec![Node::scalar("one"), Node::scalar("two")]),
        )]));
        let tokens = linearize(&tree);
        let entries: Vec<_> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.token_type == TokenType::BlockEntry)
            .map(|(index, _)| index)
            .collect();

        assert_eq!(entries.len(), 2);
        for index in entries {
            assert_eq!(tokens[index + 1].token_type, TokenType::Scalar);
        }
        let values: Vec<_> = tokens
            .iter()
            .filter(|token| token.token_type == TokenType::Scalar)
            .map(|token| token.value.as_str())
            .collect();
        assert_eq!(values, ["items", "one", "two"]);
    }

    #[test]
    fn alias_surfaces_as_scalar_token() {
        let tree = Node::document(Node::sequence(vec![Node::alias("sport")]));
        let tokens = linearize(&tree);
        let scalar = tokens
            .iter()
            .find(|token| token.token_type == TokenType::Scalar)
            .unwrap();
        assert_eq!(scalar.value, "*sport");
    }

    #[test]
    fn stream_markers_bracket_every_document() {
        let tokens = linearize(&Node::document(Node::scalar("x")));
        assert_eq!(tokens.first().unwrap().token_type, TokenType::StreamStart);
        assert_eq!(tokens.last().unwrap().token_type, TokenType::StreamEnd);
        assert_eq!(tokens[1].token_type, TokenType::DocumentStart);
        assert_eq!(tokens[tokens.len() - 2].token_type, TokenType::DocumentEnd);
    }
}
