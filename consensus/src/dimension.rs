//! Evaluation dimensions — the fixed set of axes every concept is scored on.

use serde::{Deserialize, Serialize};

/// One evaluation axis. The declaration order is the canonical order used
/// for reports, debate notes, and consensus output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "Market Viability")]
    MarketViability,
    #[serde(rename = "Technical Feasibility")]
    TechnicalFeasibility,
    #[serde(rename = "Unit Economics")]
    UnitEconomics,
    #[serde(rename = "Competitive Moats")]
    CompetitiveMoats,
    #[serde(rename = "Scaling Bottlenecks")]
    ScalingBottlenecks,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::MarketViability,
            Dimension::TechnicalFeasibility,
            Dimension::UnitEconomics,
            Dimension::CompetitiveMoats,
            Dimension::ScalingBottlenecks,
        ]
    }

    /// Human-readable name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketViability => "Market Viability",
            Self::TechnicalFeasibility => "Technical Feasibility",
            Self::UnitEconomics => "Unit Economics",
            Self::CompetitiveMoats => "Competitive Moats",
            Self::ScalingBottlenecks => "Scaling Bottlenecks",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::all()
            .iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown dimension: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let all = Dimension::all();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], Dimension::MarketViability);
        assert_eq!(all[4], Dimension::ScalingBottlenecks);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Dimension::UnitEconomics).unwrap();
        assert_eq!(json, "\"Unit Economics\"");
        let parsed: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Dimension::UnitEconomics);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let dim: Dimension = "market viability".parse().unwrap();
        assert_eq!(dim, Dimension::MarketViability);
        assert!("Brand Appeal".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_ord_follows_declaration() {
        assert!(Dimension::MarketViability < Dimension::ScalingBottlenecks);
    }
}
