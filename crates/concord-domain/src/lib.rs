//! Concord Domain Layer
//!
//! This crate contains the value types of the Concord consensus engine. It
//! holds no I/O and no logging; the EM engine and the CLI build on top of it.
//!
//! ## Key Concepts
//!
//! - **Label Space**: the closed, ordered set of labels a run may use
//! - **Review**: one reviewer's observed label for one item
//! - **Review Ledger**: the full input collection of reviews for a run
//! - **Distribution**: a probability vector indexed by label position
//! - **Confusion Matrix**: a reviewer's P(observed label | true label)
//! - **Model**: the fitted priors plus every reviewer's confusion matrix
//!
//! ## Ordering
//!
//! Labels are indexed by their declaration order in the [`LabelSpace`], items
//! and reviewers by their first appearance in the [`ReviewLedger`]. Nothing in
//! this crate depends on hash-map iteration order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confusion;
pub mod distribution;
pub mod error;
pub mod label;
pub mod ledger;
pub mod model;
pub mod result;
pub mod review;
pub mod traits;

// Re-exports for convenience
pub use confusion::ConfusionMatrix;
pub use distribution::Distribution;
pub use error::DomainError;
pub use label::{Label, LabelSpace};
pub use ledger::{IndexedLedger, IndexedReview, ReviewLedger};
pub use model::Model;
pub use result::ConsensusResult;
pub use review::Review;
pub use traits::ReviewSource;
