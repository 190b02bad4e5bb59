//! The evaluator boundary — the one trait the panel runner dispatches on.
//!
//! Everything behind this trait is interchangeable: scripted test doubles,
//! local heuristics, or remote model APIs. The runner only sees
//! `Result<ModelEvaluation, EvaluatorError>` and treats every `Err` the same
//! way, by substituting a degraded evaluation.

use async_trait::async_trait;
use thiserror::Error;

use crate::dimension::Dimension;
use crate::verdict::ModelEvaluation;

/// Errors an evaluator can surface. None of these abort the run; the panel
/// runner degrades the failing evaluator and continues.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("could not parse evaluator response: {0}")]
    ParseError(String),

    #[error("missing API key: {0} is not set")]
    MissingApiKey(String),

    #[error("evaluator unavailable: {0}")]
    Unavailable(String),
}

/// One member of the evaluation panel.
///
/// Implementations must return a score in [1, 10] for every requested
/// dimension and a confidence in [0, 1]; the runner does not re-validate.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Stable identifier, matching the registry profile name.
    fn name(&self) -> &str;

    /// Descriptive role carried into the verdict (for example "contrarian").
    fn role(&self) -> &str;

    /// Score the concept on every requested dimension.
    async fn evaluate(
        &self,
        concept: &str,
        dimensions: &[Dimension],
    ) -> Result<ModelEvaluation, EvaluatorError>;
}
