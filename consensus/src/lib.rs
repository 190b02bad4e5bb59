//! Multi-evaluator consensus engine.
//!
//! This library provides:
//! - Concurrent panel orchestration with per-evaluator and run-level timeouts
//! - Debate detection over per-dimension score spreads
//! - Trust-and-confidence-weighted consensus synthesis with minority reports
//! - A fixed kill/proceed decision ladder
//! - Refinement synthesis: unified pivots, critical risks, and validation
//!   experiments
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use consensus::{CrucibleConfig, CrucibleOrchestrator, EvaluatorRegistry};
//!
//! # async fn run(evaluator: Arc<dyn consensus::Evaluator>) -> anyhow::Result<()> {
//! let mut orchestrator =
//!     CrucibleOrchestrator::new(EvaluatorRegistry::builtin(), CrucibleConfig::default());
//! orchestrator.register(evaluator);
//! let verdict = orchestrator.evaluate("B2B SaaS for freight brokers").await?;
//! println!("{} -> {}", verdict.consensus_score, verdict.decision);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod debate;
pub mod decision;
pub mod dimension;
pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod panel;
pub mod refinement;
pub mod registry;
pub mod synthesis;
pub mod verdict;

// Re-export the run surface
pub use config::{CrucibleConfig, DecisionThresholds};
pub use error::CrucibleError;
pub use orchestrator::CrucibleOrchestrator;

// Re-export the evaluator boundary
pub use evaluator::{Evaluator, EvaluatorError};
pub use registry::{EvaluatorProfile, EvaluatorRegistry, RegistryError};

// Re-export the data model
pub use dimension::Dimension;
pub use verdict::{CrucibleVerdict, Decision, DimensionScore, Experiment, ModelEvaluation};

// Re-export the synthesis stages for callers composing their own pipeline
pub use debate::DebateDetector;
pub use decision::DecisionEngine;
pub use panel::PanelRunner;
pub use refinement::{RefinementOutcome, RefinementSynthesizer};
pub use synthesis::{ConsensusOutcome, ConsensusSynthesizer};
