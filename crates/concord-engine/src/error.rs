//! Consensus engine error types

use concord_domain::DomainError;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ConsensusError>;

/// Errors that can occur while configuring or running consensus
///
/// Configuration problems are reported before any EM iteration runs and no
/// partial model is returned. An empty review ledger is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsensusError {
    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A review uses a label outside the configured label space
    #[error("Configuration error: review of item '{item_id}' by '{reviewer_id}' uses unknown label '{label}'")]
    UnknownLabel {
        /// Item the review belongs to
        item_id: String,
        /// Reviewer who issued it
        reviewer_id: String,
        /// The unrecognized label
        label: String,
    },

    /// A prior or posterior stopped summing to one (implementation bug)
    #[error("Numeric anomaly: {0}")]
    NumericAnomaly(String),
}

impl ConsensusError {
    /// Whether this is one of the configuration-class errors
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ConsensusError::Config(_) | ConsensusError::UnknownLabel { .. }
        )
    }
}

impl From<DomainError> for ConsensusError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownLabel {
                item_id,
                reviewer_id,
                label,
            } => ConsensusError::UnknownLabel {
                item_id,
                reviewer_id,
                label,
            },
            other => ConsensusError::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let err: ConsensusError = DomainError::EmptyLabelSpace.into();
        assert_eq!(
            err,
            ConsensusError::Config("label space must not be empty".to_string())
        );
        assert!(err.is_config());

        let err: ConsensusError = DomainError::UnknownLabel {
            item_id: "X1".to_string(),
            reviewer_id: "alice".to_string(),
            label: "MAYBE".to_string(),
        }
        .into();
        assert!(err.is_config());
        assert!(err.to_string().contains("MAYBE"));
    }

    #[test]
    fn test_numeric_anomaly_is_not_config() {
        let err = ConsensusError::NumericAnomaly("posterior sums to 0.5".to_string());
        assert!(!err.is_config());
    }
}
