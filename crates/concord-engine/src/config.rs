//! Engine configuration
//!
//! The label space, routing thresholds and EM constants for one run.

use crate::{ConsensusError, Result};
use concord_domain::label::DEFAULT_LABELS;
use concord_domain::LabelSpace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default EM iteration budget
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Default convergence threshold on the max posterior change
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Default smoothing floor added to every confusion count
pub const DEFAULT_SMOOTHING: f64 = 1e-3;

/// Configuration for a consensus run
///
/// # Examples
///
/// ```
/// use concord_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_iterations, 50);
/// assert_eq!(config.threshold_for("PASS"), 0.80);
///
/// // Labels without a threshold require certainty
/// assert_eq!(config.threshold_for("ESCALATE"), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EngineConfigFile")]
pub struct EngineConfig {
    /// Label space in tie-break order (earlier wins)
    pub labels: Vec<String>,

    /// EM iteration budget; exhausting it is not an error
    pub max_iterations: usize,

    /// Stop once no posterior entry moves by this much or more
    pub epsilon: f64,

    /// Floor added to every confusion count before normalizing
    pub smoothing: f64,

    /// Minimum confidence per winning label to skip SME escalation
    pub thresholds: BTreeMap<String, f64>,
}

/// On-disk shape of [`EngineConfig`]; every key is optional
#[derive(Deserialize)]
struct EngineConfigFile {
    #[serde(default = "default_labels")]
    labels: Vec<String>,

    #[serde(default = "default_max_iterations")]
    max_iterations: usize,

    #[serde(default = "default_epsilon")]
    epsilon: f64,

    #[serde(default = "default_smoothing")]
    smoothing: f64,

    #[serde(default)]
    thresholds: Option<BTreeMap<String, f64>>,
}

impl From<EngineConfigFile> for EngineConfig {
    fn from(file: EngineConfigFile) -> Self {
        let thresholds = match file.thresholds {
            Some(thresholds) => thresholds,
            None => default_thresholds_for(&file.labels),
        };
        Self {
            labels: file.labels,
            max_iterations: file.max_iterations,
            epsilon: file.epsilon,
            smoothing: file.smoothing,
            thresholds,
        }
    }
}

fn default_labels() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|l| l.to_string()).collect()
}

fn default_thresholds() -> BTreeMap<String, f64> {
    thresholds(&[("PASS", 0.80), ("FIX", 0.70), ("REJECT", 0.70)])
}

/// Default thresholds restricted to the labels actually declared
fn default_thresholds_for(labels: &[String]) -> BTreeMap<String, f64> {
    default_thresholds()
        .into_iter()
        .filter(|(label, _)| labels.contains(label))
        .collect()
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_smoothing() -> f64 {
    DEFAULT_SMOOTHING
}

fn thresholds(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(l, t)| (l.to_string(), *t)).collect()
}

impl Default for EngineConfig {
    /// Reference constants: PASS 0.80 / FIX 0.70 / REJECT 0.70, 50
    /// iterations, epsilon 1e-6, smoothing 1e-3
    fn default() -> Self {
        Self {
            labels: default_labels(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
            smoothing: DEFAULT_SMOOTHING,
            thresholds: default_thresholds(),
        }
    }
}

impl EngineConfig {
    /// Reference constants over a custom label space
    ///
    /// Declared labels named PASS, FIX or REJECT keep their default
    /// thresholds; any other label has none and so requires certainty.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        Self {
            thresholds: default_thresholds_for(&labels),
            labels,
            ..Self::default()
        }
    }

    /// Strict preset: higher confidence bars, tighter convergence
    pub fn strict() -> Self {
        Self {
            thresholds: thresholds(&[("PASS", 0.90), ("FIX", 0.80), ("REJECT", 0.80)]),
            max_iterations: 200,
            epsilon: 1e-9,
            ..Self::default()
        }
    }

    /// Lenient preset: fewer escalations, cheaper runs
    pub fn lenient() -> Self {
        Self {
            thresholds: thresholds(&[("PASS", 0.70), ("FIX", 0.60), ("REJECT", 0.60)]),
            max_iterations: 25,
            epsilon: 1e-4,
            ..Self::default()
        }
    }

    /// Threshold for a winning label; unconfigured labels require 1.0
    pub fn threshold_for(&self, label: &str) -> f64 {
        self.thresholds.get(label).copied().unwrap_or(1.0)
    }

    /// Build the label space this configuration declares
    pub fn label_space(&self) -> Result<LabelSpace> {
        Ok(LabelSpace::new(self.labels.iter().cloned())?)
    }

    /// Validate the configuration, returning its label space
    pub fn validate(&self) -> Result<LabelSpace> {
        let labels = self.label_space()?;

        for (label, &threshold) in &self.thresholds {
            if !labels.contains(label) {
                return Err(ConsensusError::Config(format!(
                    "threshold configured for '{}', which is not in the label space",
                    label
                )));
            }
            if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
                return Err(ConsensusError::Config(format!(
                    "threshold for '{}' must be in (0.0, 1.0], got {}",
                    label, threshold
                )));
            }
        }

        if self.max_iterations == 0 {
            return Err(ConsensusError::Config(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConsensusError::Config(format!(
                "epsilon must be a positive number, got {}",
                self.epsilon
            )));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(ConsensusError::Config(format!(
                "smoothing must be a positive number, got {}",
                self.smoothing
            )));
        }

        Ok(labels)
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConsensusError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConsensusError::Config(format!("Failed to serialize config: {}", e)))
    }
}
