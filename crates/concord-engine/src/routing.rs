//! Decision and SME routing

use crate::EngineConfig;
use concord_domain::{ConsensusResult, Distribution, LabelSpace};

/// Point decision for one posterior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Index of the winning label
    pub label: usize,

    /// Posterior mass of the winning label
    pub confidence: f64,

    /// Whether confidence fell short of the label's threshold
    pub needs_sme: bool,
}

/// Turns posteriors into decisions against per-label thresholds
#[derive(Debug, Clone)]
pub struct Router {
    labels: LabelSpace,
    thresholds: Vec<f64>,
}

impl Router {
    /// Resolve configured thresholds against the label space
    ///
    /// Labels without a configured threshold get 1.0, so they escalate
    /// unless the posterior is certain.
    pub fn new(labels: LabelSpace, config: &EngineConfig) -> Self {
        let thresholds = labels
            .iter()
            .map(|label| config.threshold_for(label.as_str()))
            .collect();
        Self { labels, thresholds }
    }

    /// Threshold of the label at `index`
    pub fn threshold(&self, index: usize) -> f64 {
        self.thresholds[index]
    }

    /// Pick the winning label and decide on escalation
    ///
    /// The argmax tie-break is label-space declaration order. Escalation is
    /// strict: confidence exactly at the threshold does not escalate.
    pub fn decide(&self, posterior: &Distribution) -> Option<Decision> {
        let (label, confidence) = posterior.argmax()?;
        Some(Decision {
            label,
            confidence,
            needs_sme: confidence < self.thresholds[label],
        })
    }

    /// Build the full result record for one item
    pub fn route(&self, item_id: &str, posterior: &Distribution) -> Option<ConsensusResult> {
        let decision = self.decide(posterior)?;
        Some(ConsensusResult {
            item_id: item_id.to_string(),
            label: self.labels.label(decision.label).to_string(),
            posterior: self
                .labels
                .iter()
                .zip(posterior.probs())
                .map(|(label, &p)| (label.to_string(), p))
                .collect(),
            confidence: decision.confidence,
            needs_sme: decision.needs_sme,
        })
    }
}
