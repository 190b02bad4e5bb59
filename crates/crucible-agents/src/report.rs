//! Verdict rendering — the plain-text report and the JSON export.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use consensus::{CrucibleVerdict, Decision};

const HEAVY_RULE: &str =
    "======================================================================";
const LIGHT_RULE: &str =
    "----------------------------------------------------------------------";

fn decision_marker(decision: Decision) -> &'static str {
    match decision {
        Decision::Kill => "[KILL]",
        Decision::ProceedWithCaution => "[CAUTION]",
        Decision::Proceed => "[OK]",
        Decision::StrongProceed => "[OK+]",
    }
}

/// Render the full evaluation report as plain text.
pub fn render(verdict: &CrucibleVerdict) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{HEAVY_RULE}");
    let _ = writeln!(out, "CRUCIBLE EVALUATION REPORT");
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, "\nOriginal Concept:\n{}\n", verdict.original_concept);

    let _ = writeln!(out, "{LIGHT_RULE}");
    let _ = writeln!(out, "DIMENSION SCORES (with Adversarial Perspectives)");
    let _ = writeln!(out, "{LIGHT_RULE}");
    for score in &verdict.dimension_scores {
        let confidence_note = if score.low_confidence {
            " (low confidence)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "\n{}: {}/10 [{}]{confidence_note}",
            score.dimension, score.score, score.perspective
        );
        let _ = writeln!(out, "  Reasoning: {}", score.reasoning);
        if !score.failure_modes.is_empty() {
            let _ = writeln!(out, "  Failure Modes:");
            for mode in &score.failure_modes {
                let _ = writeln!(out, "    - {mode}");
            }
        }
    }

    let _ = writeln!(out, "\n{HEAVY_RULE}");
    let _ = writeln!(out, "Consensus Score: {:.1}/10", verdict.consensus_score);
    let _ = writeln!(
        out,
        "{} DECISION: {}",
        decision_marker(verdict.decision),
        verdict.decision
    );
    let _ = writeln!(out, "{HEAVY_RULE}");

    if !verdict.key_debates.is_empty() {
        let _ = writeln!(out, "\n{LIGHT_RULE}");
        let _ = writeln!(out, "KEY DEBATES");
        let _ = writeln!(out, "{LIGHT_RULE}");
        for debate in &verdict.key_debates {
            let _ = writeln!(out, "  - {debate}");
        }
    }

    if let Some(report) = &verdict.minority_report {
        let _ = writeln!(out, "\n{LIGHT_RULE}");
        let _ = writeln!(out, "MINORITY REPORT");
        let _ = writeln!(out, "{LIGHT_RULE}");
        let _ = writeln!(out, "{report}");
    }

    let _ = writeln!(out, "\nREFINED CONCEPT:\n{}", verdict.refined_concept);

    let _ = writeln!(out, "\n{LIGHT_RULE}");
    let _ = writeln!(out, "KEY PIVOTS RECOMMENDED");
    let _ = writeln!(out, "{LIGHT_RULE}");
    if verdict.unified_pivots.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (i, pivot) in verdict.unified_pivots.iter().enumerate() {
        let _ = writeln!(out, "{}. {pivot}", i + 1);
    }

    let _ = writeln!(out, "\n{LIGHT_RULE}");
    let _ = writeln!(out, "VALIDATION EXPERIMENTS");
    let _ = writeln!(out, "{LIGHT_RULE}");
    for (i, exp) in verdict.validation_experiments.iter().enumerate() {
        let _ = writeln!(out, "\nExperiment {}: {}", i + 1, exp.title);
        let _ = writeln!(out, "  Hypothesis: {}", exp.hypothesis);
        let _ = writeln!(out, "  Method: {}", exp.method);
        let _ = writeln!(out, "  Success Criteria: {}", exp.success_criteria);
        let _ = writeln!(out, "  Cost: {}", exp.estimated_cost);
        let _ = writeln!(out, "  Time: {}", exp.estimated_time);
    }

    let _ = writeln!(out, "\n{LIGHT_RULE}");
    let _ = writeln!(out, "CRITICAL RISKS");
    let _ = writeln!(out, "{LIGHT_RULE}");
    if verdict.critical_risks.is_empty() {
        let _ = writeln!(out, "  No critical risks identified");
    }
    for risk in &verdict.critical_risks {
        let _ = writeln!(out, "  - {risk}");
    }

    let _ = writeln!(out, "\n{HEAVY_RULE}");
    let _ = writeln!(out, "Weak ideas die here so strong ones survive.");
    let _ = writeln!(out, "{HEAVY_RULE}");

    out
}

/// Export the verdict as JSON with a generation timestamp.
pub fn write_json(verdict: &CrucibleVerdict, path: &Path) -> anyhow::Result<()> {
    let document = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "verdict": verdict,
    });
    let text = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write verdict to {}", path.display()))?;
    Ok(())
}

/// Process exit code for a decision: kills fail the pipeline, cautions warn.
pub fn exit_code(decision: Decision) -> i32 {
    match decision {
        Decision::Kill => 1,
        Decision::ProceedWithCaution => 2,
        Decision::Proceed | Decision::StrongProceed => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus::{Dimension, DimensionScore};

    fn verdict() -> CrucibleVerdict {
        CrucibleVerdict {
            original_concept: "test concept".to_string(),
            consensus_score: 6.4,
            decision: Decision::ProceedWithCaution,
            dimension_scores: vec![DimensionScore {
                dimension: Dimension::MarketViability,
                score: 6,
                reasoning: "plausible".to_string(),
                failure_modes: vec!["churn".to_string()],
                perspective: "vc_skeptic".to_string(),
                low_confidence: false,
            }],
            model_evaluations: Vec::new(),
            key_debates: vec!["Market Viability: Models disagree".to_string()],
            unified_pivots: vec!["go vertical".to_string()],
            validation_experiments: Vec::new(),
            critical_risks: vec!["[Market Viability] churn".to_string()],
            minority_report: Some("grok (contrarian) strongly disagrees".to_string()),
            refined_concept: "test concept PIVOT: go vertical".to_string(),
        }
    }

    #[test]
    fn test_render_includes_all_sections() {
        let text = render(&verdict());
        assert!(text.contains("CRUCIBLE EVALUATION REPORT"));
        assert!(text.contains("Market Viability: 6/10 [vc_skeptic]"));
        assert!(text.contains("Consensus Score: 6.4/10"));
        assert!(text.contains("DECISION: PROCEED_WITH_CAUTION"));
        assert!(text.contains("KEY DEBATES"));
        assert!(text.contains("MINORITY REPORT"));
        assert!(text.contains("1. go vertical"));
        assert!(text.contains("[Market Viability] churn"));
    }

    #[test]
    fn test_render_omits_absent_minority_report() {
        let mut v = verdict();
        v.minority_report = None;
        let text = render(&v);
        assert!(!text.contains("MINORITY REPORT"));
    }

    #[test]
    fn test_json_export_wraps_verdict_with_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verdict.json");
        write_json(&verdict(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(parsed["generated_at"].is_string());
        assert_eq!(parsed["verdict"]["decision"], "PROCEED_WITH_CAUTION");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(Decision::Kill), 1);
        assert_eq!(exit_code(Decision::ProceedWithCaution), 2);
        assert_eq!(exit_code(Decision::Proceed), 0);
        assert_eq!(exit_code(Decision::StrongProceed), 0);
    }
}
