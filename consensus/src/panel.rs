//! Panel runner — concurrent fan-out of one concept to every evaluator.
//!
//! Results come back in registration order regardless of completion order:
//! each task is tagged with its panel index and lands in a pre-sized slot
//! vector, so two runs with identical evaluator outputs produce identical
//! verdicts.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{info, warn};

use crate::config::CrucibleConfig;
use crate::dimension::Dimension;
use crate::error::CrucibleError;
use crate::evaluator::Evaluator;
use crate::verdict::ModelEvaluation;

pub struct PanelRunner {
    config: CrucibleConfig,
}

impl PanelRunner {
    pub fn new(config: CrucibleConfig) -> Self {
        Self { config }
    }

    /// Fan the concept out to every panel member concurrently.
    ///
    /// A member that errors, times out, or panics is replaced by a degraded
    /// evaluation; the run itself only fails on an empty panel. The run-level
    /// deadline is a hard stop: members still in flight when it fires are
    /// aborted and degraded.
    pub async fn run(
        &self,
        concept: &str,
        panel: &[Arc<dyn Evaluator>],
        dimensions: &[Dimension],
    ) -> Result<Vec<ModelEvaluation>, CrucibleError> {
        if panel.is_empty() {
            return Err(CrucibleError::EmptyPanel);
        }

        info!(
            evaluators = panel.len(),
            dimensions = dimensions.len(),
            "dispatching evaluation panel"
        );

        let identities: Vec<(String, String)> = panel
            .iter()
            .map(|e| (e.name().to_string(), e.role().to_string()))
            .collect();
        let mut slots: Vec<Option<ModelEvaluation>> = vec![None; panel.len()];

        let deadline = Instant::now() + self.config.panel_timeout;
        let per_evaluator = self.config.evaluator_timeout;

        let mut tasks = JoinSet::new();
        for (index, evaluator) in panel.iter().enumerate() {
            let evaluator = Arc::clone(evaluator);
            let concept = concept.to_string();
            let dimensions = dimensions.to_vec();
            tasks.spawn(async move {
                let result = timeout(per_evaluator, evaluator.evaluate(&concept, &dimensions)).await;
                (index, result)
            });
        }

        loop {
            let joined = match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(joined)) => joined,
                Ok(None) => break,
                Err(_) => {
                    warn!("panel deadline exceeded, aborting remaining evaluators");
                    tasks.abort_all();
                    break;
                }
            };

            match joined {
                Ok((index, Ok(Ok(evaluation)))) => {
                    info!(
                        evaluator = %evaluation.evaluator,
                        confidence = evaluation.confidence,
                        "evaluation complete"
                    );
                    slots[index] = Some(evaluation);
                }
                Ok((index, Ok(Err(err)))) => {
                    let (name, role) = &identities[index];
                    warn!(evaluator = %name, error = %err, "evaluator failed, degrading");
                    slots[index] = Some(self.degraded(name, role, dimensions, &err.to_string()));
                }
                Ok((index, Err(_))) => {
                    let (name, role) = &identities[index];
                    warn!(
                        evaluator = %name,
                        timeout = ?per_evaluator,
                        "evaluator timed out, degrading"
                    );
                    slots[index] = Some(self.degraded(
                        name,
                        role,
                        dimensions,
                        &format!("timed out after {}s", per_evaluator.as_secs()),
                    ));
                }
                Err(join_err) => {
                    // Index is lost when a task panics; the slot fill below
                    // covers it alongside deadline casualties.
                    warn!(error = %join_err, "evaluator task aborted");
                }
            }
        }

        let evaluations = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let (name, role) = &identities[index];
                    self.degraded(name, role, dimensions, "did not complete before panel deadline")
                })
            })
            .collect();

        Ok(evaluations)
    }

    fn degraded(
        &self,
        name: &str,
        role: &str,
        dimensions: &[Dimension],
        reason: &str,
    ) -> ModelEvaluation {
        ModelEvaluation::degraded(
            name,
            role,
            dimensions,
            self.config.neutral_score,
            self.config.degraded_confidence,
            reason,
        )
    }
}
