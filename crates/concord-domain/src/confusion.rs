//! Per-reviewer confusion matrices

use crate::Distribution;

/// A reviewer's P(observed label | true label)
///
/// Row `t` is the distribution over observed labels when the true label is
/// `t`. Rows are built from smoothed counts, so no cell is ever exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    rows: Vec<Distribution>,
}

impl ConfusionMatrix {
    /// Near-identity matrix: 1.0 on the diagonal, `smoothing` elsewhere,
    /// each row normalized
    pub fn near_identity(size: usize, smoothing: f64) -> Self {
        let rows = (0..size)
            .map(|t| {
                let weights = (0..size)
                    .map(|o| if o == t { 1.0 } else { smoothing })
                    .collect();
                Distribution::from_weights(weights)
            })
            .collect();
        Self { rows }
    }

    /// Normalize a square table of non-negative counts row by row
    pub fn from_counts(counts: Vec<Vec<f64>>) -> Self {
        Self {
            rows: counts.into_iter().map(Distribution::from_weights).collect(),
        }
    }

    /// Number of labels on each axis
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// P(observed | true)
    pub fn get(&self, true_label: usize, observed: usize) -> f64 {
        self.rows[true_label].get(observed)
    }

    /// Distribution over observed labels for one true label
    pub fn row(&self, true_label: usize) -> &Distribution {
        &self.rows[true_label]
    }

    /// Iterate rows in true-label order
    pub fn rows(&self) -> impl Iterator<Item = &Distribution> {
        self.rows.iter()
    }

    /// Whether every row is a valid distribution with no zero cell
    pub fn is_row_stochastic(&self, tolerance: f64) -> bool {
        self.rows
            .iter()
            .all(|row| row.is_valid(tolerance) && row.probs().iter().all(|&p| p > 0.0))
    }
}
