//! Concord Engine
//!
//! Dawid–Skene consensus over noisy reviewer judgments.
//!
//! The engine provides:
//! - Configuration validation (label space, thresholds, EM constants)
//! - Near-identity confusion matrix initialization
//! - The EM loop: E-step, convergence test, M-step
//! - Decision and SME routing against per-label thresholds
//! - A run report with convergence and escalation counters
//!
//! # Architecture
//!
//! ```text
//! ReviewLedger → index → EM (E ⇄ M) → Router → ConsensusResult + Model
//! ```
//!
//! Each EM iteration is a pure transformation between immutable snapshots:
//! [`estep::e_step`] maps `(Model, Ledger)` to posteriors and
//! [`mstep::m_step`] maps `(Posteriors, Ledger)` to the next model.
//!
//! # Examples
//!
//! ```
//! use concord_domain::{Review, ReviewLedger};
//! use concord_engine::{Consensus, EngineConfig};
//!
//! let engine = Consensus::new(EngineConfig::default()).unwrap();
//! let ledger: ReviewLedger = vec![
//!     Review::new("X2", "alice", "FIX"),
//!     Review::new("X2", "bob", "REJECT"),
//! ]
//! .into();
//!
//! let outcome = engine.run(&ledger).unwrap();
//! assert!(outcome.results[0].needs_sme);
//! println!("{}", outcome.report.summary());
//! ```

#![warn(missing_docs)]

mod config;
mod consensus;
pub mod em;
mod error;
pub mod estep;
pub mod init;
pub mod mstep;
mod report;
mod routing;

pub use config::{EngineConfig, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS, DEFAULT_SMOOTHING};
pub use consensus::{Consensus, ConsensusOutcome};
pub use error::{ConsensusError, Result};
pub use report::RunReport;
pub use routing::{Decision, Router};
