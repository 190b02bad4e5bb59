//! Run configuration — thresholds, timeouts, and output caps.
//!
//! Every threshold here is product policy rather than a derived constant, so
//! all of them stay configurable with the documented defaults.

use std::time::Duration;

/// Threshold table for the kill/proceed decision rules, evaluated in order.
#[derive(Debug, Clone)]
pub struct DecisionThresholds {
    /// Rule 1: consensus >= this and min_dim >= `strong_proceed_min_dim`.
    pub strong_proceed_min: f64,
    pub strong_proceed_min_dim: u8,
    /// Rule 2.
    pub proceed_min: f64,
    pub proceed_min_dim: u8,
    /// Rule 3.
    pub caution_min: f64,
    pub caution_min_dim: u8,
    /// Rule 4: consensus >= this and at most `max_critical` critical dimensions.
    pub rescue_min: f64,
    /// A dimension at or below this score counts as critical.
    pub critical_score: u8,
    pub max_critical: usize,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            strong_proceed_min: 8.0,
            strong_proceed_min_dim: 6,
            proceed_min: 7.0,
            proceed_min_dim: 4,
            caution_min: 6.0,
            caution_min_dim: 3,
            rescue_min: 5.0,
            critical_score: 3,
            max_critical: 1,
        }
    }
}

/// Configuration for a full evaluation run.
#[derive(Debug, Clone)]
pub struct CrucibleConfig {
    /// Per-dimension score spread at or above which a debate note is emitted.
    pub debate_threshold: u8,
    /// Gap between an evaluation's own average and the consensus score at or
    /// above which a minority report is emitted.
    pub minority_threshold: f64,
    /// Score substituted on every dimension of a degraded evaluation.
    pub neutral_score: u8,
    /// Confidence sentinel assigned to a degraded evaluation.
    pub degraded_confidence: f64,
    /// Wall-clock budget for a single evaluator.
    pub evaluator_timeout: Duration,
    /// Hard deadline for the whole panel fan-out.
    pub panel_timeout: Duration,
    /// Cap on the unified pivot list.
    pub max_pivots: usize,
    /// Cap on the critical risk list.
    pub max_risks: usize,
    /// Cap on generated validation experiments.
    pub max_experiments: usize,
    pub decision: DecisionThresholds,
}

impl Default for CrucibleConfig {
    fn default() -> Self {
        Self {
            debate_threshold: 3,
            minority_threshold: 3.0,
            neutral_score: 5,
            degraded_confidence: 0.1,
            evaluator_timeout: Duration::from_secs(30),
            panel_timeout: Duration::from_secs(120),
            max_pivots: 5,
            max_risks: 5,
            max_experiments: 3,
            decision: DecisionThresholds::default(),
        }
    }
}

impl CrucibleConfig {
    pub fn with_evaluator_timeout(mut self, timeout: Duration) -> Self {
        self.evaluator_timeout = timeout;
        self
    }

    pub fn with_panel_timeout(mut self, timeout: Duration) -> Self {
        self.panel_timeout = timeout;
        self
    }

    pub fn with_debate_threshold(mut self, threshold: u8) -> Self {
        self.debate_threshold = threshold;
        self
    }

    pub fn with_minority_threshold(mut self, threshold: f64) -> Self {
        self.minority_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let config = CrucibleConfig::default();
        assert_eq!(config.debate_threshold, 3);
        assert!((config.minority_threshold - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.neutral_score, 5);
        assert!((config.degraded_confidence - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.evaluator_timeout, Duration::from_secs(30));
        assert_eq!(config.decision.critical_score, 3);
    }

    #[test]
    fn test_builders() {
        let config = CrucibleConfig::default()
            .with_evaluator_timeout(Duration::from_secs(5))
            .with_debate_threshold(2);
        assert_eq!(config.evaluator_timeout, Duration::from_secs(5));
        assert_eq!(config.debate_threshold, 2);
    }
}
