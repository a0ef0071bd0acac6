//! Trait definitions for external interactions
//!
//! Anything that produces judgments (a human labeling export, a programmatic
//! validator, an LLM triage pass) plugs in as a [`ReviewSource`] and is
//! treated as one more reviewer.

use crate::{Review, ReviewLedger};

/// A producer of review records
pub trait ReviewSource {
    /// Reviews contributed by this source, in a stable order
    fn reviews(&self) -> Vec<Review>;
}

impl ReviewSource for [Review] {
    fn reviews(&self) -> Vec<Review> {
        self.to_vec()
    }
}

impl ReviewSource for Vec<Review> {
    fn reviews(&self) -> Vec<Review> {
        self.clone()
    }
}

impl ReviewSource for ReviewLedger {
    fn reviews(&self) -> Vec<Review> {
        ReviewLedger::reviews(self).to_vec()
    }
}
