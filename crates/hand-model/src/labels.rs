//! Gesture label table.
//!
//! The model only speaks in class indices; the label table maps each index
//! to a display name. Tables are stored either as a JSON array of strings
//! or as plain text with one label per line.

use std::path::Path;

use handsign_common::error::{HandsignError, HandsignResult};

use crate::result::GESTURE_CLASS_COUNT;

/// Ordered gesture names, one per class index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Build from an ordered list, which must have one entry per class.
    pub fn new(labels: Vec<String>) -> HandsignResult<Self> {
        if labels.len() != GESTURE_CLASS_COUNT {
            return Err(HandsignError::shape_mismatch(
                "label table",
                GESTURE_CLASS_COUNT,
                labels.len(),
            ));
        }
        Ok(Self { labels })
    }

    /// Placeholder names `gesture_00` .. `gesture_25`.
    pub fn numbered() -> Self {
        Self {
            labels: (0..GESTURE_CLASS_COUNT)
                .map(|i| format!("gesture_{i:02}"))
                .collect(),
        }
    }

    /// Parse table content. JSON is tried when the content starts with `[`.
    pub fn parse(content: &str) -> HandsignResult<Self> {
        let trimmed = content.trim_start();
        let labels: Vec<String> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_string)
                .collect()
        };
        Self::new(labels)
    }

    /// Load a table from disk.
    pub fn load(path: &Path) -> HandsignResult<Self> {
        if !path.exists() {
            return Err(HandsignError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Name for a class index, if it is in range.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::numbered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<String> {
        ('a'..='z').map(|c| c.to_string()).collect()
    }

    #[test]
    fn parses_json_array() {
        let json = serde_json::to_string(&letters()).unwrap();
        let table = LabelTable::parse(&json).unwrap();
        assert_eq!(table.label(0), Some("a"));
        assert_eq!(table.label(25), Some("z"));
        assert_eq!(table.label(26), None);
    }

    #[test]
    fn parses_line_per_label_and_skips_comments() {
        let text = format!("# alphabet\n{}\n\n", letters().join("\n"));
        let table = LabelTable::parse(&text).unwrap();
        assert_eq!(table.len(), GESTURE_CLASS_COUNT);
        assert_eq!(table.label(1), Some("b"));
    }

    #[test]
    fn rejects_wrong_label_count() {
        let err = LabelTable::parse("a\nb\nc\n").unwrap_err();
        assert!(matches!(
            err,
            HandsignError::ShapeMismatch {
                expected: 26,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn numbered_table_covers_every_class() {
        let table = LabelTable::numbered();
        assert_eq!(table.len(), GESTURE_CLASS_COUNT);
        assert_eq!(table.label(7), Some("gesture_07"));
    }
}
