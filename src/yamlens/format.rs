//! Canonical display names for styles and tags
//!
//!     Styles format to their enum-like names; the unset default formats to
//!     the empty string so renderers can omit the field entirely. Tags for
//!     the built-in implicit types canonicalize to their `!!x` short form in
//!     either spelling (full `tag:yaml.org,2002:x` URI or already-short
//!     `!!x`); custom tags pass through unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::yamlens::node::{Style, Tag};

static BUILTIN_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut tags = HashMap::new();
    for (uri, short) in [
        (Tag::STR, "!!str"),
        (Tag::INT, "!!int"),
        (Tag::BOOL, "!!bool"),
        (Tag::NULL, "!!null"),
        (Tag::FLOAT, "!!float"),
        (Tag::TIMESTAMP, "!!timestamp"),
        (Tag::SEQ, "!!seq"),
        (Tag::MAP, "!!map"),
    ] {
        tags.insert(uri, short);
        tags.insert(short, short);
    }
    tags
});

/// The display name of a style; empty for the unset default.
pub fn format_style(style: Style) -> &'static str {
    match style {
        Style::Default => "",
        Style::Plain => "Plain",
        Style::SingleQuoted => "SingleQuoted",
        Style::DoubleQuoted => "DoubleQuoted",
        Style::Literal => "Literal",
        Style::Folded => "Folded",
        Style::Flow => "Flow",
    }
}

/// The display form of a tag: short form for built-ins, pass-through for
/// custom tags, empty for the fully-implicit case.
pub fn format_tag(tag: &Tag) -> String {
    match tag.uri() {
        None => String::new(),
        Some(uri) => match BUILTIN_TAGS.get(uri) {
            Some(short) => (*short).to_string(),
            None => uri.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Style::Default, "")]
    #[case(Style::Plain, "Plain")]
    #[case(Style::SingleQuoted, "SingleQuoted")]
    #[case(Style::DoubleQuoted, "DoubleQuoted")]
    #[case(Style::Literal, "Literal")]
    #[case(Style::Folded, "Folded")]
    #[case(Style::Flow, "Flow")]
    fn styles_format_to_canonical_names(#[case] style: Style, #[case] expected: &str) {
        assert_eq!(format_style(style), expected);
    }

    #[rstest]
    #[case(Tag::STR, "!!str")]
    #[case(Tag::INT, "!!int")]
    #[case(Tag::BOOL, "!!bool")]
    #[case(Tag::NULL, "!!null")]
    #[case(Tag::FLOAT, "!!float")]
    #[case(Tag::TIMESTAMP, "!!timestamp")]
    #[case("!!str", "!!str")]
    #[case("!custom", "!custom")]
    #[case("tag:example.com,2024:thing", "tag:example.com,2024:thing")]
    fn tags_canonicalize_to_short_form(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(format_tag(&Tag::Resolved(uri.to_string())), expected);
        assert_eq!(format_tag(&Tag::Explicit(uri.to_string())), expected);
    }

    #[test]
    fn missing_tag_formats_to_empty() {
        assert_eq!(format_tag(&Tag::None), "");
    }
}
