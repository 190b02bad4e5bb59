//! Orchestrator — wires the panel runner, debate detector, consensus
//! synthesizer, decision engine, and refinement synthesizer into one run.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::CrucibleConfig;
use crate::debate::DebateDetector;
use crate::decision::DecisionEngine;
use crate::dimension::Dimension;
use crate::error::CrucibleError;
use crate::evaluator::Evaluator;
use crate::panel::PanelRunner;
use crate::refinement::RefinementSynthesizer;
use crate::registry::EvaluatorRegistry;
use crate::synthesis::ConsensusSynthesizer;
use crate::verdict::CrucibleVerdict;

pub struct CrucibleOrchestrator {
    registry: EvaluatorRegistry,
    config: CrucibleConfig,
    panel: Vec<Arc<dyn Evaluator>>,
}

impl CrucibleOrchestrator {
    pub fn new(registry: EvaluatorRegistry, config: CrucibleConfig) -> Self {
        Self {
            registry,
            config,
            panel: Vec::new(),
        }
    }

    /// Add an evaluator to the panel. Evaluators whose registry profile is
    /// disabled are skipped; evaluators without a profile participate with
    /// the default weight.
    pub fn register(&mut self, evaluator: Arc<dyn Evaluator>) {
        if let Some(profile) = self.registry.get(evaluator.name()) {
            if !profile.enabled {
                info!(evaluator = %evaluator.name(), "skipping disabled evaluator");
                return;
            }
        } else {
            warn!(
                evaluator = %evaluator.name(),
                "evaluator has no registry profile, using default weight"
            );
        }
        self.panel.push(evaluator);
    }

    pub fn panel_size(&self) -> usize {
        self.panel.len()
    }

    pub fn registry(&self) -> &EvaluatorRegistry {
        &self.registry
    }

    /// Run the full evaluation: fan out, detect debates, synthesize
    /// consensus, decide, refine.
    pub async fn evaluate(&self, concept: &str) -> Result<CrucibleVerdict, CrucibleError> {
        if concept.trim().is_empty() {
            return Err(CrucibleError::EmptyConcept);
        }
        if self.panel.is_empty() {
            return Err(CrucibleError::EmptyPanel);
        }

        info!(concept_len = concept.len(), panel = self.panel.len(), "starting evaluation run");

        let dimensions = Dimension::all();
        let runner = PanelRunner::new(self.config.clone());
        let evaluations = runner.run(concept, &self.panel, dimensions).await?;

        let key_debates = DebateDetector::new(&self.config).detect(&evaluations);

        let consensus = ConsensusSynthesizer::new(&self.registry, &self.config)
            .synthesize(&evaluations);

        let decision = DecisionEngine::new(&self.config.decision)
            .decide(consensus.consensus_score, &consensus.dimension_scores);

        let refinement = RefinementSynthesizer::new(&self.config).synthesize(
            &evaluations,
            &consensus.dimension_scores,
            concept,
            decision,
        );

        info!(
            consensus = consensus.consensus_score,
            decision = %decision,
            debates = key_debates.len(),
            "evaluation run complete"
        );

        Ok(CrucibleVerdict {
            original_concept: concept.to_string(),
            consensus_score: consensus.consensus_score,
            decision,
            dimension_scores: consensus.dimension_scores,
            model_evaluations: evaluations,
            key_debates,
            unified_pivots: refinement.unified_pivots,
            validation_experiments: refinement.validation_experiments,
            critical_risks: refinement.critical_risks,
            minority_report: consensus.minority_report,
            refined_concept: refinement.refined_concept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EvaluatorProfile;
    use crate::verdict::ModelEvaluation;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct Fixed {
        name: String,
        score: u8,
    }

    #[async_trait]
    impl Evaluator for Fixed {
        fn name(&self) -> &str {
            &self.name
        }

        fn role(&self) -> &str {
            "fixed"
        }

        async fn evaluate(
            &self,
            _concept: &str,
            dimensions: &[Dimension],
        ) -> Result<ModelEvaluation, crate::evaluator::EvaluatorError> {
            Ok(ModelEvaluation {
                evaluator: self.name.clone(),
                role: "fixed".to_string(),
                scores: dimensions.iter().map(|d| (*d, self.score)).collect::<BTreeMap<_, _>>(),
                failure_modes: Vec::new(),
                pivots_suggested: Vec::new(),
                confidence: 0.9,
                dissenting_opinion: None,
                reasoning: "fixed".to_string(),
            })
        }
    }

    fn fixed(name: &str, score: u8) -> Arc<dyn Evaluator> {
        Arc::new(Fixed {
            name: name.to_string(),
            score,
        })
    }

    #[tokio::test]
    async fn test_empty_concept_rejected_before_dispatch() {
        let mut orchestrator =
            CrucibleOrchestrator::new(EvaluatorRegistry::builtin(), CrucibleConfig::default());
        orchestrator.register(fixed("grok", 7));
        let err = orchestrator.evaluate("   \n\t ").await;
        assert!(matches!(err, Err(CrucibleError::EmptyConcept)));
    }

    #[tokio::test]
    async fn test_empty_panel_rejected() {
        let orchestrator =
            CrucibleOrchestrator::new(EvaluatorRegistry::builtin(), CrucibleConfig::default());
        let err = orchestrator.evaluate("a concept").await;
        assert!(matches!(err, Err(CrucibleError::EmptyPanel)));
    }

    #[tokio::test]
    async fn test_disabled_profile_not_registered() {
        let registry = EvaluatorRegistry::new(vec![EvaluatorProfile {
            name: "muted".to_string(),
            role: "fixed".to_string(),
            weight: 1.0,
            preferred_dimensions: Vec::new(),
            enabled: false,
        }])
        .unwrap();
        let mut orchestrator = CrucibleOrchestrator::new(registry, CrucibleConfig::default());
        orchestrator.register(fixed("muted", 7));
        assert_eq!(orchestrator.panel_size(), 0);
    }

    #[tokio::test]
    async fn test_full_run_produces_consistent_verdict() {
        let mut orchestrator =
            CrucibleOrchestrator::new(EvaluatorRegistry::builtin(), CrucibleConfig::default());
        orchestrator.register(fixed("claude_opus", 8));
        orchestrator.register(fixed("gpt_o3", 7));
        orchestrator.register(fixed("grok", 8));

        let verdict = orchestrator.evaluate("a concept").await.unwrap();
        assert_eq!(verdict.model_evaluations.len(), 3);
        assert_eq!(verdict.dimension_scores.len(), 5);
        assert!(verdict.consensus_score >= 1.0 && verdict.consensus_score <= 10.0);
        assert_eq!(verdict.model_evaluations[0].evaluator, "claude_opus");
        assert_eq!(verdict.model_evaluations[2].evaluator, "grok");
        assert!(verdict.key_debates.is_empty());
    }
}
