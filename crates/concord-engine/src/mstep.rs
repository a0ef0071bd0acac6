//! Maximization step

use concord_domain::{ConfusionMatrix, Distribution, IndexedLedger, LabelSpace, Model};

/// Re-estimate priors and confusion matrices from a full posterior snapshot
///
/// `posteriors` must be aligned with `ledger.items()`. Every confusion cell
/// starts at `smoothing`, then each review adds the posterior mass of every
/// true label into the column of its observed label.
pub fn m_step(
    labels: &LabelSpace,
    ledger: &IndexedLedger,
    posteriors: &[Distribution],
    smoothing: f64,
) -> Model {
    let size = labels.len();

    let mut prior_mass = vec![0.0; size];
    for posterior in posteriors {
        for (t, mass) in prior_mass.iter_mut().enumerate() {
            *mass += posterior.get(t);
        }
    }
    let priors = Distribution::from_weights(prior_mass);

    let confusion = (0..ledger.reviewers().len())
        .map(|reviewer| {
            let mut counts = vec![vec![smoothing; size]; size];
            for review in ledger.reviews_by_reviewer(reviewer) {
                let posterior = &posteriors[review.item];
                for (t, row) in counts.iter_mut().enumerate() {
                    row[review.label] += posterior.get(t);
                }
            }
            ConfusionMatrix::from_counts(counts)
        })
        .collect();

    Model::new(labels.clone(), ledger.reviewers().to_vec(), priors, confusion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::distribution::SUM_TOLERANCE;
    use concord_domain::{Review, ReviewLedger};

    #[test]
    fn test_priors_average_posteriors() {
        let labels = LabelSpace::new(["YES", "NO"]).unwrap();
        let ledger = ReviewLedger::from(vec![
            Review::new("A", "alice", "YES"),
            Review::new("B", "alice", "NO"),
        ])
        .index(&labels)
        .unwrap();
        let posteriors = vec![
            Distribution::from_weights(vec![1.0, 0.0]),
            Distribution::from_weights(vec![0.5, 0.5]),
        ];

        let model = m_step(&labels, &ledger, &posteriors, 1e-3);
        assert_eq!(model.priors().probs(), &[0.75, 0.25]);
    }

    #[test]
    fn test_confusion_counts() {
        let labels = LabelSpace::new(["YES", "NO"]).unwrap();
        let ledger = ReviewLedger::from(vec![
            Review::new("A", "alice", "YES"),
            Review::new("B", "alice", "NO"),
        ])
        .index(&labels)
        .unwrap();
        let posteriors = vec![
            Distribution::from_weights(vec![1.0, 0.0]),
            Distribution::from_weights(vec![1.0, 0.0]),
        ];

        let model = m_step(&labels, &ledger, &posteriors, 1e-3);
        let m = model.confusion_matrix(0);
        // True YES row: one YES, one NO observation
        assert!((m.get(0, 0) - 0.5).abs() < 1e-12);
        // True NO row: smoothing only, so uniform
        assert!((m.get(1, 0) - 0.5).abs() < 1e-12);
        assert!(m.is_row_stochastic(SUM_TOLERANCE));
    }

    #[test]
    fn test_no_zero_cells() {
        let labels = LabelSpace::default();
        let ledger = ReviewLedger::from(vec![Review::new("A", "alice", "PASS")])
            .index(&labels)
            .unwrap();
        let posteriors = vec![Distribution::from_weights(vec![1.0, 0.0, 0.0])];

        let model = m_step(&labels, &ledger, &posteriors, 1e-3);
        for row in model.confusion_matrix(0).rows() {
            assert!(row.probs().iter().all(|&p| p > 0.0));
        }
    }
}
