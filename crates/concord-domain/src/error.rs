//! Domain error type

use std::fmt;

/// Errors raised while building domain values from raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The label space has no labels
    EmptyLabelSpace,

    /// A label was declared twice
    DuplicateLabel(String),

    /// A label is empty or whitespace only
    BlankLabel,

    /// A review carries a label outside the label space
    UnknownLabel {
        /// Item the review belongs to
        item_id: String,
        /// Reviewer who issued it
        reviewer_id: String,
        /// The unrecognized label
        label: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::EmptyLabelSpace => write!(f, "label space must not be empty"),
            DomainError::DuplicateLabel(label) => {
                write!(f, "label '{}' is declared more than once", label)
            }
            DomainError::BlankLabel => write!(f, "labels must not be blank"),
            DomainError::UnknownLabel {
                item_id,
                reviewer_id,
                label,
            } => write!(
                f,
                "review of item '{}' by '{}' uses unknown label '{}'",
                item_id, reviewer_id, label
            ),
        }
    }
}

impl std::error::Error for DomainError {}
