//! Consensus runner: validation, EM fit, routing

use crate::em::fit;
use crate::{EngineConfig, Result, Router, RunReport};
use concord_domain::{ConsensusResult, LabelSpace, Model, ReviewLedger};
use serde::Serialize;
use tracing::info;

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusOutcome {
    /// One result per distinct item, in first-appearance order
    pub results: Vec<ConsensusResult>,

    /// Fitted priors and confusion matrices
    pub model: Model,

    /// Counters and convergence details
    pub report: RunReport,
}

/// The Dawid–Skene consensus engine
///
/// Holds a validated configuration; every [`Consensus::run`] is an
/// independent, deterministic batch computation, so one engine can serve
/// many cohorts (including from several threads).
///
/// # Examples
///
/// ```
/// use concord_domain::{Review, ReviewLedger};
/// use concord_engine::Consensus;
///
/// let ledger: ReviewLedger = vec![
///     Review::new("X1", "alice", "PASS"),
///     Review::new("X1", "bob", "PASS"),
///     Review::new("X1", "carol", "PASS"),
/// ]
/// .into();
///
/// let outcome = Consensus::default_config().run(&ledger).unwrap();
/// assert_eq!(outcome.results[0].label, "PASS");
/// assert!(!outcome.results[0].needs_sme);
/// ```
#[derive(Debug, Clone)]
pub struct Consensus {
    config: EngineConfig,
    labels: LabelSpace,
    router: Router,
}

impl Consensus {
    /// Create an engine, validating the configuration up front
    pub fn new(config: EngineConfig) -> Result<Self> {
        let labels = config.validate()?;
        let router = Router::new(labels.clone(), &config);
        Ok(Self {
            config,
            labels,
            router,
        })
    }

    /// Create an engine with the reference configuration
    pub fn default_config() -> Self {
        let config = EngineConfig::default();
        let labels = LabelSpace::default_labels();
        let router = Router::new(labels.clone(), &config);
        Self {
            config,
            labels,
            router,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The label space in use
    pub fn labels(&self) -> &LabelSpace {
        &self.labels
    }

    /// Infer a label, confidence and escalation flag for every item
    ///
    /// Every review is checked against the label space before EM starts; an
    /// unknown label fails the whole run. An empty ledger yields no results
    /// and an empty model.
    pub fn run(&self, ledger: &ReviewLedger) -> Result<ConsensusOutcome> {
        if ledger.is_empty() {
            info!("Empty review ledger, nothing to fit");
            return Ok(ConsensusOutcome {
                results: Vec::new(),
                model: Model::empty(self.labels.clone()),
                report: RunReport::new(),
            });
        }

        let indexed = ledger.index(&self.labels)?;
        info!(
            items = indexed.items().len(),
            reviewers = indexed.reviewers().len(),
            reviews = indexed.review_count(),
            labels = self.labels.len(),
            "Starting consensus run"
        );

        let fit = fit(&self.labels, &indexed, &self.config)?;

        let results: Vec<ConsensusResult> = indexed
            .items()
            .iter()
            .zip(&fit.posteriors)
            .filter_map(|(item, posterior)| self.router.route(item, posterior))
            .collect();

        let mut report = RunReport {
            item_count: indexed.items().len(),
            reviewer_count: indexed.reviewers().len(),
            review_count: indexed.review_count(),
            iterations: fit.iterations,
            converged: fit.converged,
            final_delta: Some(fit.final_delta),
            ..RunReport::default()
        };
        report.record_results(&results);

        info!(
            iterations = report.iterations,
            converged = report.converged,
            escalated = report.escalated,
            "Consensus run finished"
        );

        Ok(ConsensusOutcome {
            results,
            model: fit.model,
            report,
        })
    }
}
