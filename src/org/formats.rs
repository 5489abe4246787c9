//! Output formats for scanned items
//!
//! `text` renders one [`Display`](std::fmt::Display) line per item and suits incremental
//! printing. `json` and `yaml` serialize the whole item sequence.
use super::error::FormatError;
use super::item::Item;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Json,
    #[serde(alias = "yml")]
    Yaml,
}

impl Format {
    pub const NAMES: [&'static str; 3] = ["text", "json", "yaml"];

    /// Whether items can be written one at a time as they arrive.
    pub fn is_incremental(self) -> bool {
        matches!(self, Format::Text)
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(FormatError::Unknown(other.to_string())),
        }
    }
}

/// Render a single item as one text line.
pub fn render_line(item: &Item) -> String {
    item.to_string()
}

/// Render a complete item sequence.
pub fn render(items: &[Item], format: Format) -> Result<String, FormatError> {
    match format {
        Format::Text => {
            let mut out = String::new();
            for item in items {
                out.push_str(&render_line(item));
                out.push('\n');
            }
            Ok(out)
        }
        Format::Json => Ok(serde_json::to_string_pretty(items)? + "\n"),
        Format::Yaml => Ok(serde_yaml::to_string(items)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::scanner::scan;

    #[test]
    fn test_parse_format_names() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
        assert!(matches!(
            "html".parse::<Format>(),
            Err(FormatError::Unknown(name)) if name == "html"
        ));
    }

    #[test]
    fn test_render_text() {
        let items = scan("#+TITLE: Blog\n* Intro :a:\n").unwrap();
        insta::assert_snapshot!(render(&items, Format::Text).unwrap(), @r"
        Keyword[Key: TITLE, Value: Blog; 1:0..1:13]
        Headline[1, 'Intro', [a]; 2:0..2:11]
        ");
    }

    #[test]
    fn test_render_json_round_trips_through_serde_value() {
        let items = scan("# note\n").unwrap();
        let out = render(&items, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "comment");
        assert_eq!(value[0]["body"], " note");
    }

    #[test]
    fn test_render_yaml() {
        let items = scan("plain\n").unwrap();
        let out = render(&items, Format::Yaml).unwrap();
        assert!(out.contains("kind: text"));
        assert!(out.contains("body: plain"));
    }
}
