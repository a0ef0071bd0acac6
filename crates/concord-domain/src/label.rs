//! Labels and the label space

use crate::DomainError;
use std::collections::HashSet;
use std::fmt;

/// Labels used when no label space is configured
pub const DEFAULT_LABELS: [&str; 3] = ["PASS", "FIX", "REJECT"];

/// An opaque discrete label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    /// Create a label from any string-like value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The closed, ordered set of labels for one run
///
/// Declaration order matters: a label's position is its index into every
/// [`Distribution`](crate::Distribution) and confusion matrix row, and
/// argmax ties are broken in favour of the label declared first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpace {
    labels: Vec<Label>,
}

impl LabelSpace {
    /// Build a label space, rejecting empty, blank or duplicate labels
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<Label> = labels.into_iter().map(Label::new).collect();
        if labels.is_empty() {
            return Err(DomainError::EmptyLabelSpace);
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if label.as_str().trim().is_empty() {
                return Err(DomainError::BlankLabel);
            }
            if !seen.insert(label.as_str()) {
                return Err(DomainError::DuplicateLabel(label.to_string()));
            }
        }

        Ok(Self { labels })
    }

    /// The default PASS / FIX / REJECT triad, in that tie-break order
    pub fn default_labels() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|l| Label::new(*l)).collect(),
        }
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed label space
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of a label, if it belongs to the space
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.as_str() == label)
    }

    /// Whether the label belongs to the space
    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    /// Label at a position
    ///
    /// # Panics
    /// Panics if `index` is out of range
    pub fn label(&self, index: usize) -> &Label {
        &self.labels[index]
    }

    /// Iterate labels in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

impl Default for LabelSpace {
    fn default() -> Self {
        Self::default_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_order() {
        let space = LabelSpace::default();
        let names: Vec<&str> = space.iter().map(Label::as_str).collect();
        assert_eq!(names, vec!["PASS", "FIX", "REJECT"]);
        assert_eq!(space.index_of("FIX"), Some(1));
    }

    #[test]
    fn test_empty_space_rejected() {
        let result = LabelSpace::new(Vec::<String>::new());
        assert_eq!(result, Err(DomainError::EmptyLabelSpace));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let result = LabelSpace::new(["A", "B", "A"]);
        assert_eq!(result, Err(DomainError::DuplicateLabel("A".to_string())));
    }

    #[test]
    fn test_blank_label_rejected() {
        assert_eq!(LabelSpace::new(["A", "  "]), Err(DomainError::BlankLabel));
    }

    #[test]
    fn test_unknown_label_lookup() {
        let space = LabelSpace::default();
        assert!(!space.contains("MAYBE"));
        assert!(space.index_of("pass").is_none()); // Labels are case-sensitive
    }
}
