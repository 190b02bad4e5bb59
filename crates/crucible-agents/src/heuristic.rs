//! Heuristic evaluators — rule-based panel members used when no API keys
//! are configured, and as the fallback behind the remote evaluators.
//!
//! Every heuristic member shares the keyword engine but applies a role
//! disposition on its focus dimensions, so a panel of heuristics still
//! disagrees the way a real adversarial panel would.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use consensus::{
    Dimension, Evaluator, EvaluatorError, EvaluatorProfile, EvaluatorRegistry, ModelEvaluation,
};

use crate::keyword::{self, flag_labels, pivot_for};

/// Per-evaluator pivot cap, matching what the remote evaluators enforce.
const MAX_PIVOTS: usize = 3;

/// Score adjustment a role applies to its focus dimensions. Skeptical roles
/// push down, the contrarian pushes hardest, the speed analyst rounds up.
fn role_bias(role: &str) -> i8 {
    match role {
        "vc_skeptic" | "cost_optimizer" | "technical_auditor" => -1,
        "contrarian" => -2,
        "speed_analyst" => 1,
        _ => 0,
    }
}

pub struct HeuristicEvaluator {
    name: String,
    role: String,
    focus: Vec<Dimension>,
}

impl HeuristicEvaluator {
    pub fn new(name: impl Into<String>, role: impl Into<String>, focus: &[Dimension]) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            focus: focus.to_vec(),
        }
    }

    pub fn from_profile(profile: &EvaluatorProfile) -> Self {
        Self::new(&profile.name, &profile.role, &profile.preferred_dimensions)
    }

    /// One heuristic member per enabled registry profile, in registry order.
    pub fn panel(registry: &EvaluatorRegistry) -> Vec<Arc<dyn Evaluator>> {
        registry
            .enabled_profiles()
            .map(|p| Arc::new(Self::from_profile(p)) as Arc<dyn Evaluator>)
            .collect()
    }

    fn biased_score(&self, dimension: Dimension, base: u8) -> u8 {
        let bias = if self.focus.contains(&dimension) {
            role_bias(&self.role)
        } else {
            0
        };
        (i16::from(base) + i16::from(bias)).clamp(1, 10) as u8
    }
}

#[async_trait]
impl Evaluator for HeuristicEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        &self.role
    }

    async fn evaluate(
        &self,
        concept: &str,
        dimensions: &[Dimension],
    ) -> Result<ModelEvaluation, EvaluatorError> {
        let lowered = concept.to_lowercase();

        let mut scores = BTreeMap::new();
        let mut failure_modes = Vec::new();
        let mut pivots = Vec::new();
        let mut reasoning_parts = Vec::new();
        let mut evidence = 0usize;

        for dimension in dimensions {
            let analysis = keyword::analyze(*dimension, &lowered);
            let score = self.biased_score(*dimension, analysis.score);
            evidence += analysis.evidence();

            let (pos, neg) = flag_labels(*dimension);
            let detail = analysis.detail(pos, neg);
            reasoning_parts.push(if detail.is_empty() {
                format!("{dimension}: {}", analysis.band)
            } else {
                format!("{dimension}: {} {detail}", analysis.band)
            });

            failure_modes.extend(analysis.failure_modes);
            if score < 6 && pivots.len() < MAX_PIVOTS {
                pivots.push(pivot_for(*dimension).to_string());
            }
            scores.insert(*dimension, score);
        }

        // Confidence tracks how much keyword evidence was actually found.
        let confidence = (0.4 + 0.05 * evidence as f64).min(0.9);

        let dissenting_opinion = if self.role == "contrarian" {
            let avg = scores.values().map(|s| f64::from(*s)).sum::<f64>()
                / scores.len().max(1) as f64;
            (avg <= 4.0).then(|| {
                "The consensus framing is too charitable: the core assumptions behind this \
                 concept do not survive contrarian stress-testing."
                    .to_string()
            })
        } else {
            None
        };

        debug!(
            evaluator = %self.name,
            evidence,
            confidence,
            "heuristic evaluation complete"
        );

        Ok(ModelEvaluation {
            evaluator: self.name.clone(),
            role: self.role.clone(),
            scores,
            failure_modes,
            pivots_suggested: pivots,
            confidence,
            dissenting_opinion,
            reasoning: format!("From {} view: {}", self.role, reasoning_parts.join(" ")),
        })
    }
}
