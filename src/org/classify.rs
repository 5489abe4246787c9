//! Line Classification
//!
//! Pure classifiers over the text of a single line. Each one either rejects the line or extracts
//! its fields. [`classify`] applies them in priority order: comment, headline, keyword, and
//! falls back to text.
//!
//! Keyword and comment recognition use regexes compiled once on first use; headlines are
//! recognised by a hand-written scan since the tag list is parsed right to left.
use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*#\+([0-9A-Za-z_@\[\]]+):(.*)$").unwrap());
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*#([^+].*)?$").unwrap());

/// The result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Keyword { key: String, value: String },
    Comment { body: String },
    Headline(HeadlineParts),
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineParts {
    pub level: usize,
    pub body: String,
    pub tags: Vec<String>,
}

/// Classify a line, trying comment, headline and keyword in that order.
pub fn classify(text: &str) -> LineClass {
    if let Some(body) = comment(text) {
        return LineClass::Comment { body };
    }
    if let Some(parts) = headline(text) {
        return LineClass::Headline(parts);
    }
    if let Some((key, value)) = keyword(text) {
        return LineClass::Keyword { key, value };
    }
    LineClass::Text
}

/// `#+KEY: value` lines. The value is trimmed of surrounding spaces and tabs.
pub fn keyword(text: &str) -> Option<(String, String)> {
    let caps = KEYWORD_REGEX.captures(text)?;
    let key = caps.get(1)?.as_str().to_string();
    let value = caps.get(2).map_or("", |m| m.as_str());
    Some((key, trim_horizontal(value).to_string()))
}

/// `#` lines not followed by `+`. The body is everything after the `#`, untrimmed.
pub fn comment(text: &str) -> Option<String> {
    let caps = COMMENT_REGEX.captures(text)?;
    Some(caps.get(1).map_or("", |m| m.as_str()).to_string())
}

/// One or more `*` followed by a space, with an optional trailing `:tag:tag:` run.
pub fn headline(text: &str) -> Option<HeadlineParts> {
    let level = text.bytes().take_while(|&b| b == b'*').count();
    if level == 0 || text.as_bytes().get(level) != Some(&b' ') {
        return None;
    }
    let candidate = trim_horizontal(&text[level + 1..]);
    let (body, tags) = split_tags(candidate);
    Some(HeadlineParts {
        level,
        body: body.to_string(),
        tags,
    })
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'@'
}

fn is_horizontal_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn trim_horizontal(s: &str) -> &str {
    s.trim_matches(is_horizontal_whitespace)
}

/// Split a trailing tag run off a headline title.
///
/// Scans backwards from the final colon. Every colon reached closes a segment; non-empty
/// segments become tags. Scanning stops at the first byte that is neither a tag character nor
/// a colon. Without a second colon the candidate is returned untouched.
fn split_tags(candidate: &str) -> (&str, Vec<String>) {
    let bytes = candidate.as_bytes();
    if bytes.last() != Some(&b':') {
        return (candidate, Vec::new());
    }

    let mut last_colon = bytes.len() - 1;
    let mut boundary = false;
    let mut tags = Vec::new();
    for p in (0..last_colon).rev() {
        let c = bytes[p];
        if is_tag_char(c) {
            continue;
        }
        if c != b':' {
            break;
        }
        if last_colon - p > 1 {
            tags.push(candidate[p + 1..last_colon].to_string());
        }
        last_colon = p;
        boundary = true;
    }

    if !boundary {
        return (candidate, Vec::new());
    }
    tags.reverse();
    (trim_horizontal(&candidate[..last_colon]), tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_keyword() {
        assert_eq!(
            keyword("#+TITLE: My Blog"),
            Some(("TITLE".to_string(), "My Blog".to_string()))
        );
        assert_eq!(
            keyword("  \t#+date:\t2021-03-01  "),
            Some(("date".to_string(), "2021-03-01".to_string()))
        );
        assert_eq!(
            keyword("#+ATTR_HTML[x]@y:"),
            Some(("ATTR_HTML[x]@y".to_string(), String::new()))
        );
        assert_eq!(keyword("#+ KEY: VALUE"), None);
        assert_eq!(keyword("#+KEY VALUE"), None);
        assert_eq!(keyword("#+-: x"), None);
    }

    #[test]
    fn test_comment() {
        assert_eq!(comment("# a note"), Some(" a note".to_string()));
        assert_eq!(comment("   #indented"), Some("indented".to_string()));
        assert_eq!(comment("#"), Some(String::new()));
        assert_eq!(comment("#+TITLE: x"), None);
        assert_eq!(comment("text # not a comment"), None);
    }

    #[test]
    fn test_headline_levels() {
        let parts = headline("*** Deep").unwrap();
        assert_eq!(parts.level, 3);
        assert_eq!(parts.body, "Deep");
        assert!(parts.tags.is_empty());
    }

    #[test]
    fn test_headline_rejects() {
        assert_eq!(headline("*NotAHeading"), None);
        assert_eq!(headline(" * indented"), None);
        assert_eq!(headline("*\tTabbed"), None);
        assert_eq!(headline("**"), None);
        assert_eq!(headline("plain"), None);
    }

    #[test]
    fn test_headline_tags() {
        let parts = headline("** Heading :tag1:tag2:").unwrap();
        assert_eq!(parts.body, "Heading");
        assert_eq!(parts.tags, tags(&["tag1", "tag2"]));
    }

    #[test]
    fn test_headline_empty_tag_segment_is_dropped() {
        let parts = headline("* Heading :a::b:").unwrap();
        assert_eq!(parts.body, "Heading");
        assert_eq!(parts.tags, tags(&["a", "b"]));

        let parts = headline("* Heading::").unwrap();
        assert_eq!(parts.body, "Heading");
        assert!(parts.tags.is_empty());
    }

    #[test]
    fn test_headline_single_trailing_colon_stays_in_body() {
        let parts = headline("* Note:").unwrap();
        assert_eq!(parts.body, "Note:");
        assert!(parts.tags.is_empty());
    }

    #[test]
    fn test_headline_tags_only() {
        let parts = headline("* :work@home:").unwrap();
        assert_eq!(parts.body, "");
        assert_eq!(parts.tags, tags(&["work@home"]));
    }

    #[test]
    fn test_headline_scan_stops_at_non_tag_character() {
        let parts = headline("* Some text: more:tag:").unwrap();
        assert_eq!(parts.body, "Some text: more");
        assert_eq!(parts.tags, tags(&["tag"]));
    }

    #[test]
    fn test_headline_trims_candidate() {
        let parts = headline("*   Spaced out \t").unwrap();
        assert_eq!(parts.body, "Spaced out");
        assert_eq!(headline("* ").unwrap().body, "");
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify("# * not a headline"),
            LineClass::Comment {
                body: " * not a headline".to_string()
            }
        );
        assert!(matches!(classify("* #+KEY: v"), LineClass::Headline(_)));
        assert!(matches!(classify("#+KEY: v"), LineClass::Keyword { .. }));
        assert_eq!(classify("#+"), LineClass::Text);
        assert_eq!(classify(""), LineClass::Text);
    }
}
