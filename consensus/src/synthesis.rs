//! Consensus synthesis — trust-and-confidence-weighted aggregation of the
//! panel's scores into per-dimension consensus and an overall verdict score,
//! plus the minority report for the strongest dissenter.

use tracing::{debug, warn};

use crate::config::CrucibleConfig;
use crate::dimension::Dimension;
use crate::registry::EvaluatorRegistry;
use crate::verdict::{DimensionScore, ModelEvaluation};

/// Reasoning carried into a consensus `DimensionScore` is clipped to keep the
/// verdict readable; the full text stays on the `ModelEvaluation`.
const REASONING_CLIP: usize = 200;

/// Output of one synthesis pass.
#[derive(Debug, Clone)]
pub struct ConsensusOutcome {
    /// One consensus score per dimension, in canonical order.
    pub dimension_scores: Vec<DimensionScore>,
    /// Unweighted mean of the dimension scores, rounded to one decimal.
    pub consensus_score: f64,
    pub minority_report: Option<String>,
}

pub struct ConsensusSynthesizer<'a> {
    registry: &'a EvaluatorRegistry,
    config: &'a CrucibleConfig,
}

impl<'a> ConsensusSynthesizer<'a> {
    pub fn new(registry: &'a EvaluatorRegistry, config: &'a CrucibleConfig) -> Self {
        Self { registry, config }
    }

    /// Reconcile the panel's evaluations into consensus scores.
    ///
    /// Effective weight for each contribution is the evaluator's trust weight
    /// times its self-reported confidence. Dimensions where every effective
    /// weight collapses to zero fall back to an unweighted mean and are
    /// flagged low-confidence.
    pub fn synthesize(&self, evaluations: &[ModelEvaluation]) -> ConsensusOutcome {
        let mut dimension_scores = Vec::with_capacity(Dimension::all().len());

        for dimension in Dimension::all() {
            dimension_scores.push(self.synthesize_dimension(*dimension, evaluations));
        }

        let sum: u32 = dimension_scores.iter().map(|d| u32::from(d.score)).sum();
        let mean = f64::from(sum) / dimension_scores.len() as f64;
        let consensus_score = (mean * 10.0).round() / 10.0;

        let minority_report = self.find_minority_report(evaluations, consensus_score);

        ConsensusOutcome {
            dimension_scores,
            consensus_score,
            minority_report,
        }
    }

    fn synthesize_dimension(
        &self,
        dimension: Dimension,
        evaluations: &[ModelEvaluation],
    ) -> DimensionScore {
        // Contributors in panel order: (evaluation, score, effective weight).
        let contributors: Vec<(&ModelEvaluation, u8, f64)> = evaluations
            .iter()
            .filter_map(|e| {
                e.scores.get(&dimension).map(|score| {
                    let effective = self.registry.weight_of(&e.evaluator) * e.confidence;
                    (e, *score, effective)
                })
            })
            .collect();

        if contributors.is_empty() {
            warn!(dimension = %dimension, "no evaluations contributed a score");
            return DimensionScore {
                dimension,
                score: self.config.neutral_score,
                reasoning: "No evaluations available".to_string(),
                failure_modes: Vec::new(),
                perspective: "consensus".to_string(),
                low_confidence: true,
            };
        }

        let total_weight: f64 = contributors.iter().map(|(_, _, w)| *w).sum();
        let (raw, low_confidence) = if total_weight > 0.0 {
            let weighted: f64 = contributors
                .iter()
                .map(|(_, score, w)| f64::from(*score) * w)
                .sum();
            (weighted / total_weight, false)
        } else {
            // Every contribution had zero effective weight; fall back to the
            // unweighted mean and flag it.
            warn!(dimension = %dimension, "all effective weights are zero, using unweighted mean");
            let sum: u32 = contributors.iter().map(|(_, s, _)| u32::from(*s)).sum();
            (f64::from(sum) / contributors.len() as f64, true)
        };
        let score = (raw.round() as i64).clamp(1, 10) as u8;

        let lead = self.attribution_lead(dimension, &contributors);
        debug!(
            dimension = %dimension,
            score,
            lead = %lead.evaluator,
            "dimension consensus"
        );

        let mut failure_modes = Vec::new();
        for (eval, _, _) in &contributors {
            for mode in &eval.failure_modes {
                if !failure_modes.contains(mode) {
                    failure_modes.push(mode.clone());
                }
            }
        }

        let reasoning = if lead.reasoning.is_empty() {
            "See model evaluations".to_string()
        } else {
            clip(&lead.reasoning, REASONING_CLIP)
        };

        DimensionScore {
            dimension,
            score,
            reasoning,
            failure_modes,
            perspective: lead.role.clone(),
            low_confidence,
        }
    }

    /// The contributor whose reasoning and role get attributed to the
    /// consensus: highest effective weight, tie-broken by the registry's
    /// preference rank for this dimension, then by lexical evaluator name.
    fn attribution_lead<'e>(
        &self,
        dimension: Dimension,
        contributors: &[(&'e ModelEvaluation, u8, f64)],
    ) -> &'e ModelEvaluation {
        let mut best = contributors[0].0;
        let mut best_weight = contributors[0].2;
        for (eval, _, weight) in &contributors[1..] {
            if *weight > best_weight {
                best = *eval;
                best_weight = *weight;
            } else if (*weight - best_weight).abs() < f64::EPSILON {
                let rank = |name: &str| {
                    self.registry
                        .get(name)
                        .map(|p| p.preference_rank(dimension))
                        .unwrap_or(usize::MAX)
                };
                let challenger = (rank(&eval.evaluator), eval.evaluator.as_str());
                let incumbent = (rank(&best.evaluator), best.evaluator.as_str());
                if challenger < incumbent {
                    best = *eval;
                }
            }
        }
        best
    }

    /// The single strongest dissenter, when one diverges from consensus by at
    /// least the minority threshold. Ties keep panel order.
    fn find_minority_report(
        &self,
        evaluations: &[ModelEvaluation],
        consensus_score: f64,
    ) -> Option<String> {
        let mut strongest: Option<(&ModelEvaluation, f64, f64)> = None;
        for eval in evaluations {
            let Some(avg) = eval.average_score() else {
                continue;
            };
            let gap = (avg - consensus_score).abs();
            if gap >= self.config.minority_threshold
                && strongest.map_or(true, |(_, _, best_gap)| gap > best_gap)
            {
                strongest = Some((eval, avg, gap));
            }
        }

        strongest.map(|(eval, avg, _)| {
            let case = eval.dissenting_opinion.as_deref().unwrap_or(&eval.reasoning);
            format!(
                "{} ({}) strongly disagrees: Scored {avg:.1} vs consensus {consensus_score:.1}. {case}",
                eval.evaluator, eval.role
            )
        })
    }
}

/// Clip text to at most `max` characters, respecting char boundaries.
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EvaluatorProfile;
    use std::collections::BTreeMap;

    fn registry() -> EvaluatorRegistry {
        EvaluatorRegistry::builtin()
    }

    fn eval(name: &str, role: &str, confidence: f64, scores: &[(Dimension, u8)]) -> ModelEvaluation {
        ModelEvaluation {
            evaluator: name.to_string(),
            role: role.to_string(),
            scores: scores.iter().copied().collect::<BTreeMap<_, _>>(),
            failure_modes: Vec::new(),
            pivots_suggested: Vec::new(),
            confidence,
            dissenting_opinion: None,
            reasoning: format!("{name} reasoning"),
        }
    }

    fn full_scores(score: u8) -> Vec<(Dimension, u8)> {
        Dimension::all().iter().map(|d| (*d, score)).collect()
    }

    #[test]
    fn test_weighted_mean_favors_heavier_evaluator() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        // claude_opus weight 1.5 vs kimi weight 0.8, equal confidence.
        let evals = vec![
            eval("claude_opus", "deep_reasoning_critic", 1.0, &[(Dimension::MarketViability, 9)]),
            eval("kimi", "apac_expansion", 1.0, &[(Dimension::MarketViability, 3)]),
        ];
        let outcome = synth.synthesize(&evals);
        let market = &outcome.dimension_scores[0];
        // (9*1.5 + 3*0.8) / 2.3 = 6.91 -> 7
        assert_eq!(market.score, 7);
        assert!(!market.low_confidence);
        assert_eq!(market.perspective, "deep_reasoning_critic");
    }

    #[test]
    fn test_zero_effective_weight_falls_back_unweighted() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let evals = vec![
            eval("grok", "contrarian", 0.0, &[(Dimension::UnitEconomics, 2)]),
            eval("qwen", "cost_optimizer", 0.0, &[(Dimension::UnitEconomics, 8)]),
        ];
        let outcome = synth.synthesize(&evals);
        let econ = outcome
            .dimension_scores
            .iter()
            .find(|d| d.dimension == Dimension::UnitEconomics)
            .unwrap();
        assert_eq!(econ.score, 5);
        assert!(econ.low_confidence);
    }

    #[test]
    fn test_unscored_dimension_gets_neutral_low_confidence() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let evals = vec![eval("grok", "contrarian", 0.9, &[(Dimension::MarketViability, 7)])];
        let outcome = synth.synthesize(&evals);
        let moats = outcome
            .dimension_scores
            .iter()
            .find(|d| d.dimension == Dimension::CompetitiveMoats)
            .unwrap();
        assert_eq!(moats.score, config.neutral_score);
        assert!(moats.low_confidence);
        assert_eq!(moats.perspective, "consensus");
    }

    #[test]
    fn test_consensus_score_is_unweighted_dimension_mean() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let evals = vec![eval("qwen", "cost_optimizer", 1.0, &full_scores(8))];
        let outcome = synth.synthesize(&evals);
        assert!((outcome.consensus_score - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attribution_tie_breaks_on_preference_then_name() {
        // Two evaluators with identical effective weight; deepseek_r1 prefers
        // Technical Feasibility, qwen does not.
        let registry = EvaluatorRegistry::new(vec![
            EvaluatorProfile::new("qwen", "cost_optimizer", 1.0),
            EvaluatorProfile::new("deepseek_r1", "technical_auditor", 1.0)
                .with_preferred(&[Dimension::TechnicalFeasibility]),
        ])
        .unwrap();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let evals = vec![
            eval("qwen", "cost_optimizer", 0.8, &[(Dimension::TechnicalFeasibility, 6)]),
            eval(
                "deepseek_r1",
                "technical_auditor",
                0.8,
                &[(Dimension::TechnicalFeasibility, 6)],
            ),
        ];
        let outcome = synth.synthesize(&evals);
        let tech = outcome
            .dimension_scores
            .iter()
            .find(|d| d.dimension == Dimension::TechnicalFeasibility)
            .unwrap();
        assert_eq!(tech.perspective, "technical_auditor");
    }

    #[test]
    fn test_minority_report_names_strongest_dissenter() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let mut dissenter = eval("grok", "contrarian", 1.0, &full_scores(10));
        dissenter.dissenting_opinion = Some("Everyone is underpricing the upside.".to_string());
        let evals = vec![
            eval("claude_opus", "deep_reasoning_critic", 1.0, &full_scores(4)),
            eval("gpt_o3", "vc_skeptic", 1.0, &full_scores(4)),
            eval("qwen", "cost_optimizer", 1.0, &full_scores(4)),
            dissenter,
        ];
        let outcome = synth.synthesize(&evals);
        let report = outcome.minority_report.expect("dissent above threshold");
        assert!(report.starts_with("grok (contrarian)"));
        assert!(report.contains("underpricing"));
    }

    #[test]
    fn test_minority_report_falls_back_to_reasoning() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        // Dissenter without an explicit dissenting opinion.
        let evals = vec![
            eval("claude_opus", "deep_reasoning_critic", 1.0, &full_scores(4)),
            eval("gpt_o3", "vc_skeptic", 1.0, &full_scores(4)),
            eval("qwen", "cost_optimizer", 1.0, &full_scores(4)),
            eval("grok", "contrarian", 1.0, &full_scores(10)),
        ];
        let outcome = synth.synthesize(&evals);
        let report = outcome.minority_report.expect("dissent above threshold");
        assert!(report.ends_with("grok reasoning"));
    }

    #[test]
    fn test_no_minority_report_below_threshold() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let evals = vec![
            eval("claude_opus", "deep_reasoning_critic", 1.0, &full_scores(6)),
            eval("grok", "contrarian", 1.0, &full_scores(8)),
        ];
        let outcome = synth.synthesize(&evals);
        assert!(outcome.minority_report.is_none());
    }

    #[test]
    fn test_failure_modes_dedup_first_seen() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let mut a = eval("claude_opus", "deep_reasoning_critic", 1.0, &[(Dimension::MarketViability, 5)]);
        a.failure_modes = vec!["Churn risk".to_string(), "Thin margins".to_string()];
        let mut b = eval("gpt_o3", "vc_skeptic", 1.0, &[(Dimension::MarketViability, 5)]);
        b.failure_modes = vec!["Thin margins".to_string(), "No moat".to_string()];

        let outcome = synth.synthesize(&[a, b]);
        let market = &outcome.dimension_scores[0];
        assert_eq!(
            market.failure_modes,
            vec!["Churn risk", "Thin margins", "No moat"]
        );
    }

    #[test]
    fn test_monotonicity_raising_scores_never_lowers_consensus() {
        let registry = registry();
        let config = CrucibleConfig::default();
        let synth = ConsensusSynthesizer::new(&registry, &config);

        let base = vec![
            eval("claude_opus", "deep_reasoning_critic", 0.9, &[(Dimension::MarketViability, 4)]),
            eval("grok", "contrarian", 0.7, &[(Dimension::MarketViability, 6)]),
        ];
        let raised = vec![
            eval("claude_opus", "deep_reasoning_critic", 0.9, &[(Dimension::MarketViability, 6)]),
            eval("grok", "contrarian", 0.7, &[(Dimension::MarketViability, 8)]),
        ];
        let low = synth.synthesize(&base).dimension_scores[0].score;
        let high = synth.synthesize(&raised).dimension_scores[0].score;
        assert!(high >= low);
    }
}
