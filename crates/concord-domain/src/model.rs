//! Fitted consensus model

use crate::{ConfusionMatrix, Distribution, LabelSpace};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;

/// Priors plus one confusion matrix per reviewer
///
/// A model is an immutable snapshot: each EM iteration produces a new one
/// from the previous posteriors instead of updating this one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    labels: LabelSpace,
    reviewers: Vec<String>,
    priors: Distribution,
    confusion: Vec<ConfusionMatrix>,
}

impl Model {
    /// Assemble a model; `confusion[i]` belongs to `reviewers[i]`
    ///
    /// # Panics
    /// Panics if the reviewer and matrix counts differ
    pub fn new(
        labels: LabelSpace,
        reviewers: Vec<String>,
        priors: Distribution,
        confusion: Vec<ConfusionMatrix>,
    ) -> Self {
        assert_eq!(
            reviewers.len(),
            confusion.len(),
            "every reviewer needs exactly one confusion matrix"
        );
        Self {
            labels,
            reviewers,
            priors,
            confusion,
        }
    }

    /// The model of an empty ledger: no priors, no reviewers
    pub fn empty(labels: LabelSpace) -> Self {
        Self {
            labels,
            reviewers: Vec::new(),
            priors: Distribution::empty(),
            confusion: Vec::new(),
        }
    }

    /// Whether the model was fitted on no reviews
    pub fn is_empty(&self) -> bool {
        self.priors.is_empty()
    }

    /// Label space the model is defined over
    pub fn labels(&self) -> &LabelSpace {
        &self.labels
    }

    /// Reviewer ids, aligned with [`Model::confusion_matrix`]
    pub fn reviewers(&self) -> &[String] {
        &self.reviewers
    }

    /// Population prior over true labels
    pub fn priors(&self) -> &Distribution {
        &self.priors
    }

    /// Confusion matrix by reviewer index
    pub fn confusion_matrix(&self, reviewer: usize) -> &ConfusionMatrix {
        &self.confusion[reviewer]
    }

    /// Confusion matrix by reviewer id
    pub fn confusion_for(&self, reviewer_id: &str) -> Option<&ConfusionMatrix> {
        self.reviewers
            .iter()
            .position(|r| r == reviewer_id)
            .map(|i| &self.confusion[i])
    }

    /// Prior-weighted probability that a reviewer reports the true label
    ///
    /// accuracy = Σ prior[t] × confusion[t][t]
    pub fn reviewer_accuracy(&self, reviewer_id: &str) -> Option<f64> {
        let matrix = self.confusion_for(reviewer_id)?;
        Some(
            (0..self.priors.len())
                .map(|t| self.priors.get(t) * matrix.get(t, t))
                .sum(),
        )
    }

    /// Priors keyed by label name
    pub fn priors_by_label(&self) -> BTreeMap<&str, f64> {
        self.labels
            .iter()
            .zip(self.priors.probs())
            .map(|(label, &p)| (label.as_str(), p))
            .collect()
    }

    /// Confusion matrices as reviewer → true label → observed label → probability
    pub fn confusion_by_reviewer(&self) -> BTreeMap<&str, BTreeMap<&str, BTreeMap<&str, f64>>> {
        self.reviewers
            .iter()
            .zip(&self.confusion)
            .map(|(reviewer, matrix)| {
                let rows: BTreeMap<&str, BTreeMap<&str, f64>> = self
                    .labels
                    .iter()
                    .zip(matrix.rows())
                    .map(|(true_label, row)| {
                        let cells: BTreeMap<&str, f64> = self
                            .labels
                            .iter()
                            .zip(row.probs())
                            .map(|(observed, &p)| (observed.as_str(), p))
                            .collect();
                        (true_label.as_str(), cells)
                    })
                    .collect();
                (reviewer.as_str(), rows)
            })
            .collect()
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Model", 2)?;
        state.serialize_field("priors", &self.priors_by_label())?;
        state.serialize_field("confusion_matrices", &self.confusion_by_reviewer())?;
        state.end()
    }
}
