//! Discrete probability distributions over a label space

/// Tolerance used when checking that a distribution sums to one
pub const SUM_TOLERANCE: f64 = 1e-9;

/// A probability vector indexed by label position
///
/// Used for priors, per-item posteriors and confusion matrix rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: Vec<f64>,
}

impl Distribution {
    /// Uniform distribution over `size` labels
    pub fn uniform(size: usize) -> Self {
        let p = if size == 0 { 0.0 } else { 1.0 / size as f64 };
        Self {
            probs: vec![p; size],
        }
    }

    /// Distribution over no labels (used by the empty model)
    pub fn empty() -> Self {
        Self { probs: Vec::new() }
    }

    /// Normalize non-negative weights into a distribution
    ///
    /// Falls back to uniform when the total is zero, negative or not finite,
    /// so a fully underflowed score vector never divides by zero.
    pub fn from_weights(mut weights: Vec<f64>) -> Self {
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Self::uniform(weights.len());
        }

        for w in &mut weights {
            *w /= total;
        }
        Self { probs: weights }
    }

    /// Normalize natural-log weights into a distribution
    ///
    /// Shifts by the largest log weight before exponentiating, so long
    /// products of small probabilities keep their ratios instead of
    /// underflowing. Falls back to uniform only when no weight is finite.
    pub fn from_log_weights(log_weights: Vec<f64>) -> Self {
        let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Self::uniform(log_weights.len());
        }

        Self::from_weights(log_weights.into_iter().map(|l| (l - max).exp()).collect())
    }

    /// Number of labels covered
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Whether the distribution covers no labels
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Probability at a label position
    pub fn get(&self, index: usize) -> f64 {
        self.probs[index]
    }

    /// All probabilities in label order
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Whether every entry is in [0, 1] and the total is 1 within `tolerance`
    pub fn is_valid(&self, tolerance: f64) -> bool {
        !self.probs.is_empty()
            && self.probs.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p))
            && (self.total() - 1.0).abs() <= tolerance
    }

    /// Position and mass of the most probable label
    ///
    /// Ties go to the lowest position, i.e. the label declared first in the
    /// label space. Returns `None` for an empty distribution.
    pub fn argmax(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &p) in self.probs.iter().enumerate() {
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((index, p)),
            }
        }
        best
    }

    /// Largest absolute per-label difference between two distributions
    pub fn max_abs_diff(&self, other: &Distribution) -> f64 {
        self.probs
            .iter()
            .zip(&other.probs)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
