//! Scanned items
//!
//!     An item is an immutable, classified unit of output. Four kinds exist: headlines and
//!     keywords always cover exactly one line, comments and text may cover a run of consecutive
//!     lines whose bodies are joined with `\n`.
//!
//!     Richer outline constructs (drawers, lists, tables, blocks, inline markup) are not produced
//!     here; a later layer that understands them would build on top of this item stream.

use super::range::Span;
use serde::Serialize;
use std::fmt;

/// Discriminant of an [`Item`], handy for filtering and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Headline,
    Keyword,
    Comment,
    Text,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Headline => "Headline",
            ItemKind::Keyword => "Keyword",
            ItemKind::Comment => "Comment",
            ItemKind::Text => "Text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    /// An outline entry; `level` is the number of leading stars.
    Headline {
        level: usize,
        body: String,
        tags: Vec<String>,
        span: Span,
    },
    /// A `#+KEY: value` directive.
    Keyword {
        key: String,
        value: String,
        span: Span,
    },
    Comment {
        body: String,
        span: Span,
    },
    Text {
        body: String,
        span: Span,
    },
}

impl Item {
    pub fn span(&self) -> &Span {
        match self {
            Item::Headline { span, .. }
            | Item::Keyword { span, .. }
            | Item::Comment { span, .. }
            | Item::Text { span, .. } => span,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Headline { .. } => ItemKind::Headline,
            Item::Keyword { .. } => ItemKind::Keyword,
            Item::Comment { .. } => ItemKind::Comment,
            Item::Text { .. } => ItemKind::Text,
        }
    }

    /// The textual payload: headline title, keyword value, comment or text body.
    pub fn body(&self) -> &str {
        match self {
            Item::Headline { body, .. } | Item::Comment { body, .. } | Item::Text { body, .. } => {
                body
            }
            Item::Keyword { value, .. } => value,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Headline {
                level,
                body,
                tags,
                span,
            } => write!(
                f,
                "Headline[{}, '{}', [{}]; {}]",
                level,
                body,
                tags.join(", "),
                span
            ),
            Item::Keyword { key, value, span } => {
                write!(f, "Keyword[Key: {}, Value: {}; {}]", key, value, span)
            }
            Item::Comment { body, span } => write!(f, "Comment[{:?}; {}]", body, span),
            Item::Text { body, span } => write!(f, "Text[{:?}; {}]", body, span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::range::Position;

    fn line_span(line: usize, width: usize, bytes: std::ops::Range<usize>) -> Span {
        Span::new(bytes, Position::new(line, 0), Position::new(line, width))
    }

    #[test]
    fn test_display_headline() {
        let item = Item::Headline {
            level: 2,
            body: "Heading".to_string(),
            tags: vec!["tag1".to_string(), "tag2".to_string()],
            span: line_span(1, 22, 0..22),
        };
        assert_eq!(item.to_string(), "Headline[2, 'Heading', [tag1, tag2]; 1:0..1:22]");
        assert_eq!(item.kind(), ItemKind::Headline);
        assert_eq!(item.body(), "Heading");
    }

    #[test]
    fn test_display_escapes_multiline_bodies() {
        let item = Item::Text {
            body: "one\ntwo".to_string(),
            span: Span::new(0..8, Position::new(1, 0), Position::new(2, 3)),
        };
        assert_eq!(item.to_string(), "Text[\"one\\ntwo\"; 1:0..2:3]");
    }

    #[test]
    fn test_keyword_body_is_value() {
        let item = Item::Keyword {
            key: "TITLE".to_string(),
            value: "My Blog".to_string(),
            span: line_span(1, 16, 0..16),
        };
        assert_eq!(item.body(), "My Blog");
        assert_eq!(item.span().bytes, 0..16);
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let item = Item::Comment {
            body: " note".to_string(),
            span: line_span(3, 6, 10..17),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "comment");
        assert_eq!(json["body"], " note");
        assert_eq!(json["span"]["start"]["line"], 3);
        assert_eq!(json["span"]["bytes"]["end"], 17);
    }
}
