//! Debate detection — flag dimensions where the panel split hard.

use tracing::{debug, info};

use crate::config::CrucibleConfig;
use crate::dimension::Dimension;
use crate::verdict::ModelEvaluation;

/// Scans per-dimension score spreads and produces disagreement notes.
pub struct DebateDetector {
    threshold: u8,
}

impl DebateDetector {
    pub fn new(config: &CrucibleConfig) -> Self {
        Self {
            threshold: config.debate_threshold,
        }
    }

    /// One note per dimension whose spread (max - min) meets the threshold,
    /// in canonical dimension order. Dimensions scored by fewer than two
    /// evaluators cannot debate.
    pub fn detect(&self, evaluations: &[ModelEvaluation]) -> Vec<String> {
        let mut debates = Vec::new();

        for dimension in Dimension::all() {
            let scores: Vec<u8> = evaluations
                .iter()
                .filter_map(|e| e.scores.get(dimension).copied())
                .collect();
            if scores.len() < 2 {
                continue;
            }

            let min = scores.iter().copied().min().unwrap_or(0);
            let max = scores.iter().copied().max().unwrap_or(0);
            let spread = max.saturating_sub(min);
            if spread >= self.threshold {
                let avg =
                    f64::from(scores.iter().map(|s| u32::from(*s)).sum::<u32>()) / scores.len() as f64;
                info!(
                    dimension = %dimension,
                    min,
                    max,
                    "panel disagreement detected"
                );
                debates.push(format!(
                    "{dimension}: Models disagree (range {min}-{max}, avg {avg:.1}) - requires deeper analysis"
                ));
            } else {
                debug!(dimension = %dimension, spread, "within agreement band");
            }
        }

        debates
    }
}
