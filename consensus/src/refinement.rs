//! Refinement synthesis — unified pivots, critical risks, validation
//! experiments, and the refined concept text.

use crate::config::CrucibleConfig;
use crate::dimension::Dimension;
use crate::verdict::{Decision, DimensionScore, Experiment, ModelEvaluation};

/// Output of refinement synthesis, folded into the verdict by the orchestrator.
#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    pub unified_pivots: Vec<String>,
    pub validation_experiments: Vec<Experiment>,
    pub critical_risks: Vec<String>,
    pub refined_concept: String,
}

pub struct RefinementSynthesizer<'a> {
    config: &'a CrucibleConfig,
}

impl<'a> RefinementSynthesizer<'a> {
    pub fn new(config: &'a CrucibleConfig) -> Self {
        Self { config }
    }

    pub fn synthesize(
        &self,
        evaluations: &[ModelEvaluation],
        dimension_scores: &[DimensionScore],
        concept: &str,
        decision: Decision,
    ) -> RefinementOutcome {
        let unified_pivots = self.unify_pivots(evaluations);
        let critical_risks = self.collect_risks(dimension_scores);
        let validation_experiments = self.generate_experiments(dimension_scores);
        let refined_concept = self.refine_concept(concept, &unified_pivots, decision);

        RefinementOutcome {
            unified_pivots,
            validation_experiments,
            critical_risks,
            refined_concept,
        }
    }

    /// Pivots from every evaluation in panel order, deduplicated
    /// case-insensitively on first occurrence, capped.
    fn unify_pivots(&self, evaluations: &[ModelEvaluation]) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut pivots = Vec::new();
        for eval in evaluations {
            for pivot in &eval.pivots_suggested {
                let key = pivot.to_lowercase();
                if !seen.contains(&key) {
                    seen.push(key);
                    pivots.push(pivot.clone());
                }
                if pivots.len() == self.config.max_pivots {
                    return pivots;
                }
            }
        }
        pivots
    }

    /// Failure modes drawn from the weakest dimensions first, each tagged
    /// with its dimension, until the cap is reached. The sort is stable so
    /// equal scores keep canonical dimension order.
    fn collect_risks(&self, dimension_scores: &[DimensionScore]) -> Vec<String> {
        let mut by_weakness: Vec<&DimensionScore> = dimension_scores.iter().collect();
        by_weakness.sort_by_key(|d| d.score);

        let mut risks = Vec::new();
        for ds in by_weakness {
            for mode in &ds.failure_modes {
                risks.push(format!("[{}] {}", ds.dimension, mode));
                if risks.len() == self.config.max_risks {
                    return risks;
                }
            }
        }
        risks
    }

    /// One experiment per weak dimension, weakest first, from the static
    /// per-dimension templates.
    fn generate_experiments(&self, dimension_scores: &[DimensionScore]) -> Vec<Experiment> {
        let mut by_weakness: Vec<&DimensionScore> = dimension_scores.iter().collect();
        by_weakness.sort_by_key(|d| d.score);

        by_weakness
            .iter()
            .take(self.config.max_experiments)
            .map(|ds| experiment_template(ds.dimension))
            .collect()
    }

    fn refine_concept(&self, concept: &str, pivots: &[String], decision: Decision) -> String {
        if decision == Decision::Kill {
            return format!("KILL: {concept} - Fundamental issues require complete rethink.");
        }
        if pivots.is_empty() {
            return concept.to_string();
        }
        let top: Vec<&str> = pivots.iter().take(2).map(String::as_str).collect();
        format!("{concept} PIVOT: {}", top.join(" AND "))
    }
}

/// Static validation-experiment template for a dimension. Costs and time
/// ranges are product policy, not computed.
fn experiment_template(dimension: Dimension) -> Experiment {
    match dimension {
        Dimension::MarketViability => Experiment {
            title: "Customer Discovery Sprint".to_string(),
            hypothesis: "Target customers have urgent need and willingness to pay".to_string(),
            method: "Interview 20-30 target customers, measure genuine interest and LOI commitment"
                .to_string(),
            success_criteria: "50%+ express strong interest, 20%+ willing to prepay or sign LOI"
                .to_string(),
            estimated_cost: "$500-2000".to_string(),
            estimated_time: "2-3 weeks".to_string(),
        },
        Dimension::TechnicalFeasibility => Experiment {
            title: "Technical Proof of Concept".to_string(),
            hypothesis: "Core technology delivers promised value at acceptable cost/performance"
                .to_string(),
            method: "Build minimal prototype of hardest component, measure performance".to_string(),
            success_criteria: "Achieves 80%+ of promised capability within 2x cost budget"
                .to_string(),
            estimated_cost: "$2000-10000".to_string(),
            estimated_time: "2-4 weeks".to_string(),
        },
        Dimension::UnitEconomics => Experiment {
            title: "Unit Economics Stress Test".to_string(),
            hypothesis: "Unit economics are profitable at scale with conservative assumptions"
                .to_string(),
            method: "Build detailed financial model, stress test key variables".to_string(),
            success_criteria:
                "LTV/CAC > 3, payback < 18 months, positive unit economics by month 12".to_string(),
            estimated_cost: "$500-1000".to_string(),
            estimated_time: "1 week".to_string(),
        },
        Dimension::CompetitiveMoats => Experiment {
            title: "Competitive Differentiation Test".to_string(),
            hypothesis: "Our unique value proposition is defensible and meaningful".to_string(),
            method: "A/B test our pitch vs competitor alternatives with target customers"
                .to_string(),
            success_criteria: "60%+ choose our approach when presented with alternatives"
                .to_string(),
            estimated_cost: "$1000-3000".to_string(),
            estimated_time: "2 weeks".to_string(),
        },
        Dimension::ScalingBottlenecks => Experiment {
            title: "Scaling Simulation".to_string(),
            hypothesis: "Operations and costs scale sub-linearly with growth".to_string(),
            method: "Model operational requirements at 10x and 100x scale".to_string(),
            success_criteria: "Variable costs < 30% of revenue at scale".to_string(),
            estimated_cost: "$500-2000".to_string(),
            estimated_time: "1-2 weeks".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn eval_with_pivots(name: &str, pivots: &[&str]) -> ModelEvaluation {
        ModelEvaluation {
            evaluator: name.to_string(),
            role: "test".to_string(),
            scores: BTreeMap::new(),
            failure_modes: Vec::new(),
            pivots_suggested: pivots.iter().map(|p| p.to_string()).collect(),
            confidence: 0.8,
            dissenting_opinion: None,
            reasoning: String::new(),
        }
    }

    fn dim_score(dimension: Dimension, score: u8, failure_modes: &[&str]) -> DimensionScore {
        DimensionScore {
            dimension,
            score,
            reasoning: String::new(),
            failure_modes: failure_modes.iter().map(|m| m.to_string()).collect(),
            perspective: "test".to_string(),
            low_confidence: false,
        }
    }

    fn all_dims(scores: &[u8]) -> Vec<DimensionScore> {
        scores
            .iter()
            .zip(Dimension::all())
            .map(|(s, d)| dim_score(*d, *s, &[]))
            .collect()
    }

    #[test]
    fn test_pivots_dedup_case_insensitive_capped() {
        let config = CrucibleConfig::default();
        let synth = RefinementSynthesizer::new(&config);
        let evals = vec![
            eval_with_pivots("a", &["Target enterprise", "add usage pricing"]),
            eval_with_pivots("b", &["TARGET ENTERPRISE", "Go vertical", "Open source core"]),
            eval_with_pivots("c", &["White-label it", "Sell the data", "Franchise model"]),
        ];
        let outcome = synth.synthesize(&evals, &all_dims(&[7, 7, 7, 7, 7]), "c", Decision::Proceed);
        assert_eq!(outcome.unified_pivots.len(), 5);
        assert_eq!(outcome.unified_pivots[0], "Target enterprise");
        assert_eq!(outcome.unified_pivots[2], "Go vertical");
        // Capped at five, so the sixth candidate never appears.
        assert!(!outcome.unified_pivots.contains(&"Franchise model".to_string()));
    }

    #[test]
    fn test_risks_come_from_weakest_dimensions_first() {
        let config = CrucibleConfig::default();
        let synth = RefinementSynthesizer::new(&config);
        let dims = vec![
            dim_score(Dimension::MarketViability, 8, &["Market risk"]),
            dim_score(Dimension::TechnicalFeasibility, 2, &["Tech risk A", "Tech risk B"]),
            dim_score(Dimension::UnitEconomics, 4, &["Econ risk"]),
            dim_score(Dimension::CompetitiveMoats, 9, &[]),
            dim_score(Dimension::ScalingBottlenecks, 6, &["Scale risk"]),
        ];
        let outcome = synth.synthesize(&[], &dims, "c", Decision::Kill);
        assert_eq!(
            outcome.critical_risks,
            vec![
                "[Technical Feasibility] Tech risk A",
                "[Technical Feasibility] Tech risk B",
                "[Unit Economics] Econ risk",
                "[Scaling Bottlenecks] Scale risk",
                "[Market Viability] Market risk",
            ]
        );
    }

    #[test]
    fn test_risks_capped() {
        let config = CrucibleConfig::default();
        let synth = RefinementSynthesizer::new(&config);
        let dims = vec![dim_score(
            Dimension::UnitEconomics,
            2,
            &["r1", "r2", "r3", "r4", "r5", "r6"],
        )];
        let outcome = synth.synthesize(&[], &dims, "c", Decision::Kill);
        assert_eq!(outcome.critical_risks.len(), 5);
    }

    #[test]
    fn test_experiments_track_weakest_dimensions() {
        let config = CrucibleConfig::default();
        let synth = RefinementSynthesizer::new(&config);
        let outcome = synth.synthesize(
            &[],
            &all_dims(&[9, 3, 4, 8, 5]),
            "c",
            Decision::ProceedWithCaution,
        );
        assert_eq!(outcome.validation_experiments.len(), 3);
        assert_eq!(outcome.validation_experiments[0].title, "Technical Proof of Concept");
        assert_eq!(outcome.validation_experiments[1].title, "Unit Economics Stress Test");
        assert_eq!(outcome.validation_experiments[2].title, "Scaling Simulation");
    }

    #[test]
    fn test_refined_concept_kill_and_pivot_forms() {
        let config = CrucibleConfig::default();
        let synth = RefinementSynthesizer::new(&config);

        let killed = synth.synthesize(&[], &all_dims(&[3, 3, 3, 3, 3]), "bad idea", Decision::Kill);
        assert_eq!(
            killed.refined_concept,
            "KILL: bad idea - Fundamental issues require complete rethink."
        );

        let evals = vec![eval_with_pivots("a", &["go upmarket", "bundle services", "third"])];
        let pivoted = synth.synthesize(&evals, &all_dims(&[7, 7, 7, 7, 7]), "idea", Decision::Proceed);
        assert_eq!(
            pivoted.refined_concept,
            "idea PIVOT: go upmarket AND bundle services"
        );

        let plain = synth.synthesize(&[], &all_dims(&[7, 7, 7, 7, 7]), "idea", Decision::Proceed);
        assert_eq!(plain.refined_concept, "idea");
    }
}
