//! Review records

use serde::{Deserialize, Serialize};

/// One reviewer's judgment of one item
///
/// Reviews are immutable input. The same (item, reviewer) pair may appear
/// more than once; every occurrence counts as independent evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Item under review
    pub item_id: String,

    /// Reviewer who issued the judgment
    pub reviewer_id: String,

    /// Observed label, as issued by the reviewer
    pub label: String,
}

impl Review {
    /// Create a new review
    pub fn new(
        item_id: impl Into<String>,
        reviewer_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            reviewer_id: reviewer_id.into(),
            label: label.into(),
        }
    }
}
