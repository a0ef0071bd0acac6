//! Per-item consensus output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final decision for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Item the decision is about
    pub item_id: String,

    /// Winning label
    pub label: String,

    /// Full posterior over the label space
    pub posterior: BTreeMap<String, f64>,

    /// Posterior mass of the winning label, in [0, 1]
    pub confidence: f64,

    /// Whether the item goes to a subject-matter expert
    pub needs_sme: bool,
}
