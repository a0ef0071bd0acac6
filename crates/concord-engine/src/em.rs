//! EM loop and convergence policy

use crate::estep::e_step;
use crate::init::initial_model;
use crate::mstep::m_step;
use crate::{ConsensusError, EngineConfig, Result};
use concord_domain::distribution::SUM_TOLERANCE;
use concord_domain::{Distribution, IndexedLedger, LabelSpace, Model};
use tracing::{debug, warn};

/// State frozen at the end of the EM loop
#[derive(Debug, Clone, PartialEq)]
pub struct EmFit {
    /// Fitted priors and confusion matrices
    pub model: Model,

    /// Final posteriors, aligned with the ledger's items
    pub posteriors: Vec<Distribution>,

    /// E-steps executed
    pub iterations: usize,

    /// Whether the loop stopped on epsilon rather than on the budget
    pub converged: bool,

    /// Max posterior change observed by the last E-step
    pub final_delta: f64,
}

/// Run EM to convergence or budget exhaustion
///
/// Each iteration is a pure `(Model, Ledger) → Posteriors → Model` step over
/// complete snapshots. When the change after an E-step is below epsilon the
/// loop stops without running that iteration's M-step. Convergence is only
/// accepted once at least one M-step has run, so posteriors that happen to
/// equal the uniform starting point do not stop the loop at iteration 1.
/// The ledger must hold at least one item.
pub fn fit(labels: &LabelSpace, ledger: &IndexedLedger, config: &EngineConfig) -> Result<EmFit> {
    let mut model = initial_model(labels, ledger, config.smoothing);
    let mut posteriors = vec![Distribution::uniform(labels.len()); ledger.items().len()];
    let mut iterations = 0;
    let mut converged = false;
    let mut final_delta = f64::INFINITY;

    while iterations < config.max_iterations {
        let next = e_step(&model, ledger);
        check_posteriors(ledger, &next)?;

        final_delta = max_change(&posteriors, &next);
        posteriors = next;
        iterations += 1;
        debug!(iteration = iterations, delta = final_delta, "E-step complete");

        if iterations > 1 && final_delta < config.epsilon {
            converged = true;
            break;
        }

        model = m_step(labels, ledger, &posteriors, config.smoothing);
        check_priors(&model)?;
    }

    if !converged {
        warn!(
            iterations,
            delta = final_delta,
            epsilon = config.epsilon,
            "EM iteration budget exhausted before convergence"
        );
    }

    Ok(EmFit {
        model,
        posteriors,
        iterations,
        converged,
        final_delta,
    })
}

/// Largest per-label change across all items
fn max_change(previous: &[Distribution], next: &[Distribution]) -> f64 {
    previous
        .iter()
        .zip(next)
        .map(|(a, b)| a.max_abs_diff(b))
        .fold(0.0, f64::max)
}

fn check_posteriors(ledger: &IndexedLedger, posteriors: &[Distribution]) -> Result<()> {
    for (item, posterior) in ledger.items().iter().zip(posteriors) {
        if !posterior.is_valid(SUM_TOLERANCE) {
            return Err(ConsensusError::NumericAnomaly(format!(
                "posterior of item '{}' sums to {}",
                item,
                posterior.total()
            )));
        }
    }
    Ok(())
}

fn check_priors(model: &Model) -> Result<()> {
    if !model.priors().is_valid(SUM_TOLERANCE) {
        return Err(ConsensusError::NumericAnomaly(format!(
            "priors sum to {}",
            model.priors().total()
        )));
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use concord_domain::{Review, ReviewLedger};
    use proptest::prelude::*;

    fn ledger_strategy() -> impl Strategy<Value = ReviewLedger> {
        prop::collection::vec((0..6usize, 0..4usize, 0..3usize), 1..30).prop_map(|triples| {
            let labels = ["PASS", "FIX", "REJECT"];
            triples
                .into_iter()
                .map(|(item, reviewer, label)| {
                    Review::new(format!("item-{}", item), format!("rev-{}", reviewer), labels[label])
                })
                .collect()
        })
    }

    proptest! {
        /// Property: posteriors and confusion rows stay valid distributions
        #[test]
        fn test_fit_keeps_distributions_valid(ledger in ledger_strategy()) {
            let labels = LabelSpace::default();
            let indexed = ledger.index(&labels).unwrap();
            let fit = fit(&labels, &indexed, &EngineConfig::default()).unwrap();

            for posterior in &fit.posteriors {
                prop_assert!(posterior.is_valid(SUM_TOLERANCE), "sum {}", posterior.total());
            }
            for r in 0..fit.model.reviewers().len() {
                prop_assert!(fit.model.confusion_matrix(r).is_row_stochastic(SUM_TOLERANCE));
            }
        }

        /// Property: identical input gives bit-identical output
        #[test]
        fn test_fit_is_deterministic(ledger in ledger_strategy()) {
            let labels = LabelSpace::default();
            let indexed = ledger.index(&labels).unwrap();
            let first = fit(&labels, &indexed, &EngineConfig::default()).unwrap();
            let second = fit(&labels, &indexed, &EngineConfig::default()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
