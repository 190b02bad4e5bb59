//! Decision engine — the fixed kill/proceed ladder.
//!
//! The rules run in priority order so a strong overall average can never
//! mask one catastrophic dimension: rules 1-3 all gate on the minimum
//! dimension score, and the rescue rule only tolerates isolated weakness.

use tracing::info;

use crate::config::DecisionThresholds;
use crate::verdict::{Decision, DimensionScore};

pub struct DecisionEngine<'a> {
    thresholds: &'a DecisionThresholds,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(thresholds: &'a DecisionThresholds) -> Self {
        Self { thresholds }
    }

    /// Map consensus onto one of the four decision levels. First rule that
    /// matches wins.
    pub fn decide(&self, consensus_score: f64, dimension_scores: &[DimensionScore]) -> Decision {
        let t = self.thresholds;
        let min_dim = dimension_scores
            .iter()
            .map(|d| d.score)
            .min()
            .unwrap_or(0);
        let critical_count = dimension_scores
            .iter()
            .filter(|d| d.score <= t.critical_score)
            .count();

        let decision = if consensus_score >= t.strong_proceed_min
            && min_dim >= t.strong_proceed_min_dim
        {
            Decision::StrongProceed
        } else if consensus_score >= t.proceed_min && min_dim >= t.proceed_min_dim {
            Decision::Proceed
        } else if consensus_score >= t.caution_min && min_dim >= t.caution_min_dim {
            Decision::ProceedWithCaution
        } else if consensus_score >= t.rescue_min && critical_count <= t.max_critical {
            Decision::ProceedWithCaution
        } else {
            Decision::Kill
        };

        info!(
            consensus = consensus_score,
            min_dim,
            critical_count,
            decision = %decision,
            "decision made"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    fn scores(values: &[u8]) -> Vec<DimensionScore> {
        values
            .iter()
            .zip(Dimension::all())
            .map(|(score, dimension)| DimensionScore {
                dimension: *dimension,
                score: *score,
                reasoning: String::new(),
                failure_modes: Vec::new(),
                perspective: "test".to_string(),
                low_confidence: false,
            })
            .collect()
    }

    fn decide(consensus: f64, values: &[u8]) -> Decision {
        let thresholds = DecisionThresholds::default();
        DecisionEngine::new(&thresholds).decide(consensus, &scores(values))
    }

    #[test]
    fn test_strong_proceed() {
        assert_eq!(decide(8.4, &[9, 8, 8, 8, 9]), Decision::StrongProceed);
    }

    #[test]
    fn test_proceed() {
        assert_eq!(decide(7.2, &[8, 8, 7, 5, 8]), Decision::Proceed);
    }

    #[test]
    fn test_min_dim_gate_blocks_strong_proceed() {
        // High average with one catastrophic dimension cannot proceed.
        let decision = decide(9.0, &[10, 10, 10, 2, 10]);
        assert_ne!(decision, Decision::StrongProceed);
        assert_ne!(decision, Decision::Proceed);
    }

    #[test]
    fn test_caution_by_rule_three() {
        assert_eq!(decide(6.2, &[7, 6, 6, 3, 9]), Decision::ProceedWithCaution);
    }

    #[test]
    fn test_rescue_rule_tolerates_one_critical() {
        assert_eq!(decide(5.4, &[8, 7, 2, 5, 5]), Decision::ProceedWithCaution);
    }

    #[test]
    fn test_two_criticals_kill() {
        assert_eq!(decide(5.2, &[9, 9, 2, 2, 4]), Decision::Kill);
    }

    #[test]
    fn test_low_consensus_kills() {
        assert_eq!(decide(3.6, &[4, 4, 3, 3, 4]), Decision::Kill);
    }
}
