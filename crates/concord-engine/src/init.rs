//! Initial model for the first E-step

use concord_domain::{ConfusionMatrix, Distribution, IndexedLedger, LabelSpace, Model};

/// Uniform priors and a near-identity confusion matrix for every reviewer
///
/// The identity bias breaks the label-permutation symmetry of EM without
/// assuming anything about a particular reviewer's skill.
pub fn initial_model(labels: &LabelSpace, ledger: &IndexedLedger, smoothing: f64) -> Model {
    let size = labels.len();
    let matrix = ConfusionMatrix::near_identity(size, smoothing);
    Model::new(
        labels.clone(),
        ledger.reviewers().to_vec(),
        Distribution::uniform(size),
        vec![matrix; ledger.reviewers().len()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::distribution::SUM_TOLERANCE;
    use concord_domain::{Review, ReviewLedger};

    #[test]
    fn test_one_matrix_per_reviewer() {
        let labels = LabelSpace::default();
        let ledger: ReviewLedger = vec![
            Review::new("X1", "alice", "PASS"),
            Review::new("X1", "bob", "FIX"),
            Review::new("X2", "alice", "PASS"),
        ]
        .into();
        let indexed = ledger.index(&labels).unwrap();

        let model = initial_model(&labels, &indexed, 1e-3);
        assert_eq!(model.reviewers(), &["alice".to_string(), "bob".to_string()]);
        assert_eq!(model.priors().probs(), Distribution::uniform(3).probs());
        for r in 0..2 {
            let m = model.confusion_matrix(r);
            assert!(m.is_row_stochastic(SUM_TOLERANCE));
            assert!(m.get(0, 0) > 0.99);
        }
    }
}
