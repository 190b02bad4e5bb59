//! Verdict data model — evaluations, consensus scores, and the final verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// Kill-or-proceed decision for a concept, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Kill,
    ProceedWithCaution,
    Proceed,
    StrongProceed,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kill => write!(f, "KILL"),
            Self::ProceedWithCaution => write!(f, "PROCEED_WITH_CAUTION"),
            Self::Proceed => write!(f, "PROCEED"),
            Self::StrongProceed => write!(f, "STRONG_PROCEED"),
        }
    }
}

/// Consensus score for a single dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Integer score in [1, 10].
    pub score: u8,
    pub reasoning: String,
    pub failure_modes: Vec<String>,
    /// Role of the evaluator the reasoning is attributed to.
    pub perspective: String,
    /// Set when no usable effective weight existed for this dimension and the
    /// consensus fell back to an unweighted or neutral value.
    #[serde(default)]
    pub low_confidence: bool,
}

/// One evaluator's full pass over a concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub evaluator: String,
    pub role: String,
    /// Dimension -> score in [1, 10]. BTreeMap keeps iteration deterministic.
    pub scores: BTreeMap<Dimension, u8>,
    pub failure_modes: Vec<String>,
    pub pivots_suggested: Vec<String>,
    /// Self-reported confidence in [0, 1].
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dissenting_opinion: Option<String>,
    pub reasoning: String,
}

impl ModelEvaluation {
    /// Fallback evaluation substituted when an evaluator fails or times out:
    /// neutral score on every requested dimension, confidence pinned at the
    /// low sentinel, one failure mode naming the reason.
    pub fn degraded(
        evaluator: impl Into<String>,
        role: impl Into<String>,
        dimensions: &[Dimension],
        neutral_score: u8,
        confidence_floor: f64,
        reason: &str,
    ) -> Self {
        let evaluator = evaluator.into();
        Self {
            scores: dimensions.iter().map(|d| (*d, neutral_score)).collect(),
            failure_modes: vec![format!("Evaluator {evaluator} unavailable: {reason}")],
            pivots_suggested: Vec::new(),
            confidence: confidence_floor,
            dissenting_opinion: None,
            reasoning: format!("Degraded evaluation substituted for {evaluator}: {reason}"),
            role: role.into(),
            evaluator,
        }
    }

    /// Mean of this evaluation's own scores, or `None` when it scored nothing.
    pub fn average_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let sum: u32 = self.scores.values().map(|s| u32::from(*s)).sum();
        Some(f64::from(sum) / self.scores.len() as f64)
    }
}

/// A validation experiment derived from a weak dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub title: String,
    pub hypothesis: String,
    pub method: String,
    pub success_criteria: String,
    pub estimated_cost: String,
    pub estimated_time: String,
}

/// The aggregate result of one evaluation run. Built once, immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrucibleVerdict {
    pub original_concept: String,
    /// Unweighted mean of the per-dimension consensus scores, one decimal.
    pub consensus_score: f64,
    pub decision: Decision,
    /// One consensus score per dimension, in canonical dimension order.
    pub dimension_scores: Vec<DimensionScore>,
    /// All panel evaluations, in panel registration order.
    pub model_evaluations: Vec<ModelEvaluation>,
    /// Human-readable disagreement notes, in dimension order.
    pub key_debates: Vec<String>,
    pub unified_pivots: Vec<String>,
    pub validation_experiments: Vec<Experiment>,
    pub critical_risks: Vec<String>,
    /// The strongest dissenter's case, when one diverges far enough from
    /// consensus. Absent — not empty — when nobody does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minority_report: Option<String>,
    pub refined_concept: String,
}
