//! Run report for a consensus pass

use concord_domain::ConsensusResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters and convergence details for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Distinct items
    pub item_count: usize,

    /// Distinct reviewers
    pub reviewer_count: usize,

    /// Reviews consumed, duplicates included
    pub review_count: usize,

    /// E-steps executed (0 for an empty ledger)
    pub iterations: usize,

    /// Whether EM stopped on epsilon rather than on the budget
    ///
    /// Never true before the first M-step has run.
    pub converged: bool,

    /// Max posterior change seen by the last E-step, if any ran
    pub final_delta: Option<f64>,

    /// Items routed to an SME
    pub escalated: usize,

    /// Escalated items per winning label
    pub escalations_by_label: BTreeMap<String, usize>,
}

impl RunReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the escalations in a set of results
    pub fn record_results(&mut self, results: &[ConsensusResult]) {
        for result in results.iter().filter(|r| r.needs_sme) {
            self.escalated += 1;
            *self
                .escalations_by_label
                .entry(result.label.clone())
                .or_insert(0) += 1;
        }
    }

    /// Share of items routed to an SME
    pub fn escalation_rate(&self) -> f64 {
        if self.item_count == 0 {
            0.0
        } else {
            self.escalated as f64 / self.item_count as f64
        }
    }

    /// Generate a summary of the run
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Consensus Run Summary".to_string(),
            "=====================".to_string(),
            format!("Items: {}", self.item_count),
            format!("Reviewers: {}", self.reviewer_count),
            format!("Reviews: {}", self.review_count),
        ];

        if self.review_count == 0 {
            lines.push("No reviews; nothing to fit".to_string());
            return lines.join("\n");
        }

        let status = if self.converged {
            "converged"
        } else {
            "budget exhausted"
        };
        lines.push(format!("Iterations: {} ({})", self.iterations, status));
        if let Some(delta) = self.final_delta {
            lines.push(format!("Final delta: {:.3e}", delta));
        }
        lines.push(format!(
            "Escalated: {} ({:.1}%)",
            self.escalated,
            self.escalation_rate() * 100.0
        ));
        for (label, count) in &self.escalations_by_label {
            lines.push(format!("  {}: {}", label, count));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: &str, needs_sme: bool) -> ConsensusResult {
        ConsensusResult {
            item_id: "X".to_string(),
            label: label.to_string(),
            posterior: BTreeMap::new(),
            confidence: 0.5,
            needs_sme,
        }
    }

    #[test]
    fn test_record_results() {
        let mut report = RunReport::new();
        report.item_count = 4;
        report.record_results(&[
            result("FIX", true),
            result("FIX", true),
            result("PASS", false),
            result("REJECT", true),
        ]);

        assert_eq!(report.escalated, 3);
        assert_eq!(report.escalations_by_label["FIX"], 2);
        assert!(!report.escalations_by_label.contains_key("PASS"));
        assert_eq!(report.escalation_rate(), 0.75);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunReport::new().summary();
        assert!(summary.contains("Reviews: 0"));
        assert!(summary.contains("nothing to fit"));
    }

    #[test]
    fn test_summary() {
        let mut report = RunReport {
            item_count: 2,
            reviewer_count: 3,
            review_count: 5,
            iterations: 4,
            converged: true,
            final_delta: Some(2.5e-9),
            ..RunReport::default()
        };
        report.record_results(&[result("FIX", true), result("PASS", false)]);

        let summary = report.summary();
        assert!(summary.contains("Iterations: 4 (converged)"));
        assert!(summary.contains("Escalated: 1 (50.0%)"));
        assert!(summary.contains("FIX: 1"));
    }
}
