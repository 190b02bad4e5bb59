//! Evaluator registry — identity, trust weight, and dimension preferences.
//!
//! The registry is static, process-wide configuration: loaded once (built-in
//! table or a TOML file) and passed explicitly to the orchestrator rather
//! than read from ambient global state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dimension::Dimension;

/// Errors from loading or validating a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("evaluator has empty name")]
    EmptyName,

    #[error("evaluator {0} has non-positive weight {1}")]
    InvalidWeight(String, f64),

    #[error("duplicate evaluator name: {0}")]
    DuplicateName(String),
}

/// Static identity of one evaluator: stable name, descriptive role, relative
/// trust weight, and the dimensions it is considered most authoritative on
/// (used for attribution tie-breaks, never for the consensus math).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorProfile {
    pub name: String,
    pub role: String,
    /// Relative trust weight, must be > 0.
    pub weight: f64,
    #[serde(default)]
    pub preferred_dimensions: Vec<Dimension>,
    /// Participation toggle; disabled profiles are never dispatched.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl EvaluatorProfile {
    pub fn new(name: impl Into<String>, role: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            weight,
            preferred_dimensions: Vec::new(),
            enabled: true,
        }
    }

    pub fn with_preferred(mut self, dimensions: &[Dimension]) -> Self {
        self.preferred_dimensions = dimensions.to_vec();
        self
    }

    /// Position of `dimension` in this profile's preference list, or
    /// `usize::MAX` when the dimension is not preferred at all.
    pub fn preference_rank(&self, dimension: Dimension) -> usize {
        self.preferred_dimensions
            .iter()
            .position(|d| *d == dimension)
            .unwrap_or(usize::MAX)
    }
}

/// Serde shape for the registry TOML file: a list of `[[evaluator]]` tables.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(rename = "evaluator")]
    evaluators: Vec<EvaluatorProfile>,
}

/// Ordered table of evaluator profiles. Declaration order is the panel
/// dispatch order and the verdict's evaluation order.
#[derive(Debug, Clone)]
pub struct EvaluatorRegistry {
    profiles: Vec<EvaluatorProfile>,
}

impl EvaluatorRegistry {
    /// Build a registry from explicit profiles, validating each one.
    pub fn new(profiles: Vec<EvaluatorProfile>) -> Result<Self, RegistryError> {
        for (i, profile) in profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if profile.weight <= 0.0 {
                return Err(RegistryError::InvalidWeight(
                    profile.name.clone(),
                    profile.weight,
                ));
            }
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(RegistryError::DuplicateName(profile.name.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// The built-in panel: trust weights and dimension preferences for the
    /// default set of adversarial evaluators.
    pub fn builtin() -> Self {
        use Dimension::*;
        let profiles = vec![
            EvaluatorProfile::new("claude_opus", "deep_reasoning_critic", 1.5).with_preferred(&[
                TechnicalFeasibility,
                MarketViability,
                UnitEconomics,
                CompetitiveMoats,
                ScalingBottlenecks,
            ]),
            EvaluatorProfile::new("gpt_o3", "vc_skeptic", 1.3).with_preferred(&[
                MarketViability,
                CompetitiveMoats,
                UnitEconomics,
            ]),
            EvaluatorProfile::new("gemini_flash", "speed_analyst", 1.0)
                .with_preferred(&[MarketViability]),
            EvaluatorProfile::new("deepseek_r1", "technical_auditor", 1.2)
                .with_preferred(&[TechnicalFeasibility, ScalingBottlenecks]),
            EvaluatorProfile::new("grok", "contrarian", 1.1)
                .with_preferred(&[CompetitiveMoats, TechnicalFeasibility]),
            EvaluatorProfile::new("kimi", "apac_expansion", 0.8)
                .with_preferred(&[ScalingBottlenecks]),
            EvaluatorProfile::new("qwen", "cost_optimizer", 1.0)
                .with_preferred(&[UnitEconomics]),
        ];
        // Built-in table is validated by construction.
        Self { profiles }
    }

    /// Parse a registry from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = toml::from_str(text)?;
        Self::new(file.evaluators)
    }

    /// Load a registry from a TOML file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn get(&self, name: &str) -> Option<&EvaluatorProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Trust weight for an evaluator; unknown evaluators default to 1.0.
    pub fn weight_of(&self, name: &str) -> f64 {
        self.get(name).map(|p| p.weight).unwrap_or(1.0)
    }

    /// All profiles, in declaration order.
    pub fn profiles(&self) -> &[EvaluatorProfile] {
        &self.profiles
    }

    /// Profiles with participation enabled, in declaration order.
    pub fn enabled_profiles(&self) -> impl Iterator<Item = &EvaluatorProfile> {
        self.profiles.iter().filter(|p| p.enabled)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
