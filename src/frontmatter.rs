//! YAML front matter splitting for content files.
//!
//! A content file may open with a metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Research Engineer
//! date: 2023-01-01
//! ---
//! - first bullet
//! ```
//!
//! The opening marker is compared after trimming, the closing marker must be exactly `---`.
//! A file whose opening marker is never closed has no metadata and is all body, opening line
//! included.

use log::warn;
use serde_yaml::{Mapping, Value};

const MARKER: &str = "---";

/// Key/value metadata parsed from a front matter block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    fields: Mapping,
}

impl Metadata {
    /// Returns metadata without any fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a YAML block into metadata.
    ///
    /// Anything that is not a mapping (an empty block, a bare scalar, a list) yields empty
    /// metadata. Invalid YAML is logged and also yields empty metadata.
    pub fn from_yaml(source: &str) -> Self {
        match serde_yaml::from_str::<Value>(source) {
            Ok(Value::Mapping(fields)) => Self { fields },
            Ok(_) => Self::empty(),
            Err(err) => {
                warn!("Ignoring malformed front matter: {}", err);
                Self::empty()
            }
        }
    }

    /// Returns whether no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns whether `key` is present with a non-null value.
    pub fn has(&self, key: &str) -> bool {
        !matches!(self.get(key), None | Some(Value::Null))
    }

    /// Returns the scalar stored under `key` rendered as a string.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted. Null, sequences and
    /// mappings yield `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Returns the index of the closing marker line, if the lines open a complete block.
fn closing_marker_index<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    let first = lines.first()?;
    if first.as_ref().trim() != MARKER {
        return None;
    }
    lines[1..]
        .iter()
        .position(|line| line.as_ref() == MARKER)
        .map(|relative| relative + 1)
}

/// Returns whether the lines open with a complete `---` ... `---` block.
pub fn has_front_matter<S: AsRef<str>>(lines: &[S]) -> bool {
    closing_marker_index(lines).is_some()
}

/// Splits `lines` into metadata and the index of the first body line.
pub fn read_front_matter<S: AsRef<str>>(lines: &[S]) -> (Metadata, usize) {
    match closing_marker_index(lines) {
        Some(closing) => {
            let block = lines[1..closing]
                .iter()
                .map(|line| line.as_ref())
                .collect::<Vec<_>>()
                .join("\n");
            (Metadata::from_yaml(&block), closing + 1)
        }
        None => (Metadata::empty(), 0),
    }
}

/// Returns the body lines, i.e. everything after the front matter block.
pub fn body_lines<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let start = closing_marker_index(lines).map_or(0, |closing| closing + 1);
    &lines[start..]
}

/// Returns only the metadata of the front matter block.
pub fn metadata<S: AsRef<str>>(lines: &[S]) -> Metadata {
    read_front_matter(lines).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_metadata_and_body() {
        let lines = ["---", "title: X", "---", "body"];
        let (meta, start) = read_front_matter(&lines);
        assert_eq!(meta.get_str("title").as_deref(), Some("X"));
        assert_eq!(&lines[start..], &["body"]);
        assert_eq!(body_lines(&lines), &["body"]);
    }

    #[test]
    fn missing_marker_is_all_body() {
        let lines = ["no marker here"];
        let (meta, start) = read_front_matter(&lines);
        assert!(meta.is_empty());
        assert_eq!(start, 0);
        assert_eq!(body_lines(&lines), &lines);
    }

    #[test]
    fn unclosed_block_keeps_opening_line_in_body() {
        let lines = ["---", "title: X", "body"];
        assert!(metadata(&lines).is_empty());
        assert_eq!(body_lines(&lines), &lines);
        assert!(!has_front_matter(&lines));
    }

    #[test]
    fn opening_marker_is_trimmed_but_closing_is_exact() {
        let lines = ["  ---  ", "title: X", "---", "body"];
        let (meta, start) = read_front_matter(&lines);
        assert_eq!(meta.get_str("title").as_deref(), Some("X"));
        assert_eq!(start, 3);

        let indented_close = ["---", "title: X", " --- ", "body"];
        assert!(!has_front_matter(&indented_close));
    }

    #[test]
    fn closing_marker_on_last_line_leaves_empty_body() {
        let lines = ["---", "title: Only meta", "---"];
        assert!(body_lines(&lines).is_empty());
        assert_eq!(
            metadata(&lines).get_str("title").as_deref(),
            Some("Only meta")
        );
    }

    #[test]
    fn scalars_render_as_strings() {
        let lines = [
            "---",
            "date: 2021-05-01",
            "year: 2020",
            "draft: false",
            "tags: [a, b]",
            "venue:",
            "---",
        ];
        let meta = metadata(&lines);
        assert_eq!(meta.get_str("date").as_deref(), Some("2021-05-01"));
        assert_eq!(meta.get_str("year").as_deref(), Some("2020"));
        assert_eq!(meta.get_str("draft").as_deref(), Some("false"));
        assert_eq!(meta.get_str("tags"), None);
        assert!(meta.get("venue").is_some());
        assert!(!meta.has("venue"));
    }

    #[test]
    fn invalid_yaml_degrades_to_empty_metadata() {
        let lines = ["---", "title: [unclosed", "---", "body"];
        let (meta, start) = read_front_matter(&lines);
        assert!(meta.is_empty());
        assert_eq!(start, 3);
    }

    #[test]
    fn accessors_agree_on_split_point() {
        let lines = vec![
            "---".to_string(),
            "title: Agree".to_string(),
            "---".to_string(),
            "first".to_string(),
            "second".to_string(),
        ];
        let (_, start) = read_front_matter(&lines);
        assert_eq!(body_lines(&lines), &lines[start..]);
    }
}
