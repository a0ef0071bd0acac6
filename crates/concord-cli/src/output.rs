//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use concord_domain::{ConsensusResult, Model};
use concord_engine::ConsensusOutcome;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the decisions of a consensus run.
    pub fn format_outcome(&self, outcome: &ConsensusOutcome, escalated_only: bool) -> Result<String> {
        let results: Vec<&ConsensusResult> = outcome
            .results
            .iter()
            .filter(|r| !escalated_only || r.needs_sme)
            .collect();

        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "results": results,
                    "model": outcome.model,
                    "report": outcome.report,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let table = self.format_results_table(&results, &outcome.model);
                Ok(format!("{}\n\n{}", table, outcome.report.summary()))
            }
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|r| format!("{}\t{}", r.item_id, r.label))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the fitted priors and confusion matrices.
    pub fn format_model(&self, model: &Model) -> Result<String> {
        let accuracy: BTreeMap<&str, f64> = model
            .reviewers()
            .iter()
            .filter_map(|r| model.reviewer_accuracy(r).map(|a| (r.as_str(), a)))
            .collect();

        match self.format {
            OutputFormat::Json => {
                let mut value = serde_json::to_value(model)?;
                if let Some(object) = value.as_object_mut() {
                    object.insert("reviewer_accuracy".to_string(), serde_json::json!(accuracy));
                }
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(self.format_model_table(model, &accuracy)),
            OutputFormat::Quiet => Ok(model
                .reviewers()
                .iter()
                .filter_map(|r| accuracy.get(r.as_str()).map(|a| format!("{}\t{:.4}", r, a)))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_results_table(&self, results: &[&ConsensusResult], model: &Model) -> String {
        if results.is_empty() {
            return self.colorize("No items to report.", "yellow");
        }

        let labels: Vec<&str> = model.labels().iter().map(|l| l.as_str()).collect();

        let mut builder = Builder::default();
        let mut header = vec![
            "Item".to_string(),
            "Label".to_string(),
            "Confidence".to_string(),
            "Route".to_string(),
        ];
        header.extend(labels.iter().map(|l| format!("P({})", l)));
        builder.push_record(header);

        for result in results {
            let route = if result.needs_sme {
                self.colorize("SME", "red")
            } else {
                self.colorize("auto", "green")
            };
            let mut record = vec![
                result.item_id.clone(),
                result.label.clone(),
                format!("{:.4}", result.confidence),
                route,
            ];
            record.extend(labels.iter().map(|l| {
                result
                    .posterior
                    .get(*l)
                    .map(|p| format!("{:.4}", p))
                    .unwrap_or_default()
            }));
            builder.push_record(record);
        }

        styled(builder.build())
    }

    fn format_model_table(&self, model: &Model, accuracy: &BTreeMap<&str, f64>) -> String {
        if model.is_empty() {
            return self.colorize("No reviewers; model is empty.", "yellow");
        }

        let labels: Vec<&str> = model.labels().iter().map(|l| l.as_str()).collect();
        let mut sections = Vec::new();

        let mut priors = Builder::default();
        priors.push_record(["Label", "Prior"]);
        for (label, p) in labels.iter().zip(model.priors().probs()) {
            priors.push_record([label.to_string(), format!("{:.4}", p)]);
        }
        sections.push(styled(priors.build()));

        for (index, reviewer) in model.reviewers().iter().enumerate() {
            let heading = match accuracy.get(reviewer.as_str()) {
                Some(a) => format!("Reviewer {} (accuracy {:.4})", reviewer, a),
                None => format!("Reviewer {}", reviewer),
            };

            let matrix = model.confusion_matrix(index);
            let mut builder = Builder::default();
            let mut header = vec!["True \\ Observed".to_string()];
            header.extend(labels.iter().map(|l| l.to_string()));
            builder.push_record(header);
            for (t, true_label) in labels.iter().enumerate() {
                let mut record = vec![true_label.to_string()];
                record.extend((0..labels.len()).map(|o| format!("{:.4}", matrix.get(t, o))));
                builder.push_record(record);
            }

            sections.push(format!(
                "{}\n{}",
                self.colorize(&heading, "cyan"),
                styled(builder.build())
            ));
        }

        sections.join("\n\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::{Review, ReviewLedger};
    use concord_engine::Consensus;

    fn outcome() -> ConsensusOutcome {
        let ledger: ReviewLedger = vec![
            Review::new("X1", "r1", "PASS"),
            Review::new("X1", "r2", "PASS"),
            Review::new("X1", "r3", "PASS"),
            Review::new("X2", "r1", "FIX"),
            Review::new("X2", "r2", "REJECT"),
        ]
        .into();
        Consensus::default_config().run(&ledger).unwrap()
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_outcome(&outcome(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["report"]["escalated"], 1);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_outcome(&outcome(), false).unwrap();
        assert!(output.contains("P(PASS)"));
        assert!(output.contains("SME"));
        assert!(output.contains("Consensus Run Summary"));
    }

    #[test]
    fn test_quiet_escalated_only() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_outcome(&outcome(), true).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("X2\t"));
    }

    #[test]
    fn test_model_json_includes_accuracy() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_model(&outcome().model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["priors"]["PASS"].is_f64());
        assert!(value["reviewer_accuracy"]["r3"].is_f64());
    }

    #[test]
    fn test_model_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_model(&outcome().model).unwrap();
        assert!(output.contains("Reviewer r1 (accuracy"));
        assert!(output.contains("True \\ Observed"));
    }

    #[test]
    fn test_empty_outcome() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let empty = Consensus::default_config()
            .run(&ReviewLedger::new())
            .unwrap();
        assert!(formatter
            .format_outcome(&empty, false)
            .unwrap()
            .contains("No items to report."));
        assert!(formatter
            .format_model(&empty.model)
            .unwrap()
            .contains("model is empty"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
    }
}
