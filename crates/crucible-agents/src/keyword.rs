//! Keyword-driven concept analysis — the rule-based scoring engine behind
//! the heuristic evaluators.
//!
//! Each dimension has a table of green/red flag phrases, a base score, and
//! flag weights. The analysis is intentionally shallow text matching; it
//! stands in for real judgment wherever a model-backed evaluator is
//! unavailable.

use consensus::Dimension;

/// Result of analyzing one dimension of a lowercased concept.
#[derive(Debug, Clone)]
pub struct KeywordAnalysis {
    /// Clamped to [1, 10].
    pub score: u8,
    pub green_flags: Vec<&'static str>,
    pub red_flags: Vec<&'static str>,
    /// Band summary sentence for the score.
    pub band: &'static str,
    /// Canned failure modes for the dimension, most likely first.
    pub failure_modes: Vec<String>,
}

impl KeywordAnalysis {
    /// Total keyword evidence found, green and red.
    pub fn evidence(&self) -> usize {
        self.green_flags.len() + self.red_flags.len()
    }

    /// "Strengths: a, b. Concerns: c." style detail for reasoning text.
    pub fn detail(&self, positive_label: &str, negative_label: &str) -> String {
        let mut detail = String::new();
        if !self.green_flags.is_empty() {
            detail.push_str(&format!("{positive_label}: {}. ", self.green_flags.join(", ")));
        }
        if !self.red_flags.is_empty() {
            detail.push_str(&format!("{negative_label}: {}.", self.red_flags.join(", ")));
        }
        detail.trim_end().to_string()
    }
}

/// Labels used when composing flag detail text for a dimension.
pub fn flag_labels(dimension: Dimension) -> (&'static str, &'static str) {
    match dimension {
        Dimension::MarketViability => ("Strengths", "Concerns"),
        Dimension::TechnicalFeasibility => ("Advantages", "Risks"),
        Dimension::UnitEconomics => ("Positive indicators", "Warning signs"),
        Dimension::CompetitiveMoats => ("Potential moats", "Vulnerabilities"),
        Dimension::ScalingBottlenecks => ("Scale enablers", "Bottlenecks"),
    }
}

/// The canned pivot suggestion for a weak dimension.
pub fn pivot_for(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::MarketViability => {
            "Narrow focus to specific high-value customer segment to prove market fit"
        }
        Dimension::TechnicalFeasibility => {
            "Start with MVP using existing tools/APIs to reduce technical risk"
        }
        Dimension::UnitEconomics => {
            "Restructure pricing model to improve margins and customer LTV"
        }
        Dimension::CompetitiveMoats => {
            "Build network effects or data moat from day one as core strategy"
        }
        Dimension::ScalingBottlenecks => {
            "Redesign operations for automation and standardization before scaling"
        }
    }
}

/// Analyze one dimension. `concept` must already be lowercased.
pub fn analyze(dimension: Dimension, concept: &str) -> KeywordAnalysis {
    match dimension {
        Dimension::MarketViability => market_viability(concept),
        Dimension::TechnicalFeasibility => technical_feasibility(concept),
        Dimension::UnitEconomics => unit_economics(concept),
        Dimension::CompetitiveMoats => competitive_moats(concept),
        Dimension::ScalingBottlenecks => scaling_bottlenecks(concept),
    }
}

fn contains_any(concept: &str, words: &[&str]) -> bool {
    words.iter().any(|w| concept.contains(w))
}

fn clamp_score(raw: f64) -> u8 {
    (raw.round() as i64).clamp(1, 10) as u8
}

fn band(score: u8, high: &'static str, mid: &'static str, low: &'static str) -> &'static str {
    if score >= 7 {
        high
    } else if score >= 5 {
        mid
    } else {
        low
    }
}

fn market_viability(concept: &str) -> KeywordAnalysis {
    let mut green = Vec::new();
    let mut red = Vec::new();

    if contains_any(concept, &["niche", "small market", "limited audience"]) {
        red.push("Limited addressable market");
    }
    if contains_any(concept, &["billion", "enterprise", "global", "platform"]) {
        green.push("Large market opportunity");
    }
    if contains_any(concept, &["new technology", "bleeding edge", "revolutionary"]) {
        red.push("Market may not be ready for adoption");
    }
    if contains_any(concept, &["proven demand", "existing market", "growing need"]) {
        green.push("Market timing appears favorable");
    }
    if contains_any(concept, &["validated", "customers", "paying users", "revenue"]) {
        green.push("Evidence of customer demand");
    } else {
        red.push("Lack of customer validation mentioned");
    }

    let score = clamp_score(5.0 + green.len() as f64 * 2.0 - red.len() as f64 * 2.0);
    KeywordAnalysis {
        score,
        band: band(
            score,
            "Market shows promise but needs validation.",
            "Market viability is questionable.",
            "Significant market concerns identified.",
        ),
        green_flags: green,
        red_flags: red,
        failure_modes: vec![
            "Market size smaller than anticipated".to_string(),
            "Customer acquisition costs exceed projections".to_string(),
        ],
    }
}

fn technical_feasibility(concept: &str) -> KeywordAnalysis {
    let mut green = Vec::new();
    let mut red = Vec::new();

    if contains_any(concept, &["ai", "machine learning", "blockchain", "quantum"]) {
        red.push("High technical complexity and risk");
    }
    if contains_any(concept, &["simple", "existing technology", "proven stack"]) {
        green.push("Leverages proven technology");
    }
    if contains_any(concept, &["experienced", "technical team", "built before"]) {
        green.push("Team appears technically capable");
    } else {
        red.push("Team technical capability unclear");
    }
    if contains_any(concept, &["api", "integration", "dependent on"]) {
        red.push("Reliant on external dependencies");
    }

    let score = clamp_score(6.0 + green.len() as f64 * 2.0 - red.len() as f64 * 1.5);
    KeywordAnalysis {
        score,
        band: band(
            score,
            "Technical approach appears feasible.",
            "Technical execution has moderate risk.",
            "Significant technical challenges identified.",
        ),
        green_flags: green,
        red_flags: red,
        failure_modes: vec![
            "Technology doesn't perform as expected in production".to_string(),
            "Development timeline exceeds estimates by 2-3x".to_string(),
        ],
    }
}

fn unit_economics(concept: &str) -> KeywordAnalysis {
    let mut green = Vec::new();
    let mut red = Vec::new();

    if contains_any(concept, &["subscription", "recurring", "saas", "mrr"]) {
        green.push("Recurring revenue model");
    }
    if contains_any(concept, &["free", "freemium", "ad-supported"]) {
        red.push("Monetization path unclear or challenging");
    }
    if contains_any(concept, &["software", "digital", "platform", "marketplace"]) {
        green.push("High-margin business model potential");
    }
    if contains_any(concept, &["hardware", "physical", "inventory", "logistics"]) {
        red.push("Low-margin operations with high overhead");
    }
    if contains_any(concept, &["manual", "human-intensive", "service"]) {
        red.push("Unit economics may not improve with scale");
    }
    if contains_any(concept, &["automated", "self-service", "viral"]) {
        green.push("Economics improve with scale");
    }

    let score = clamp_score(5.0 + green.len() as f64 * 2.0 - red.len() as f64 * 2.0);
    KeywordAnalysis {
        score,
        band: band(
            score,
            "Unit economics show promise for profitability.",
            "Unit economics need significant improvement.",
            "Fundamental unit economics concerns.",
        ),
        green_flags: green,
        red_flags: red,
        failure_modes: vec![
            "CAC never achieves acceptable payback period".to_string(),
            "Gross margins compressed by competition".to_string(),
        ],
    }
}

fn competitive_moats(concept: &str) -> KeywordAnalysis {
    let mut green = Vec::new();
    let mut red = Vec::new();

    if contains_any(concept, &["patent", "proprietary", "network effect", "brand"]) {
        green.push("Defensible competitive advantages");
    } else {
        red.push("No clear defensible moats identified");
    }
    if contains_any(concept, &["integration", "migration", "embedded", "workflow"]) {
        green.push("High customer switching costs");
    }
    if contains_any(concept, &["easy to switch", "commodity"]) {
        red.push("Low switching costs enable competition");
    }
    if contains_any(concept, &["first mover", "only", "unique"]) {
        green.push("Early market position");
    }
    if contains_any(concept, &["crowded", "competitive", "many players"]) {
        red.push("Intensely competitive landscape");
    }
    if contains_any(concept, &["data", "network", "marketplace", "platform"]) {
        green.push("Potential for scale-based advantages");
    }

    // Default skeptical on moats.
    let score = clamp_score(4.0 + green.len() as f64 * 2.5 - red.len() as f64 * 2.0);
    KeywordAnalysis {
        score,
        band: band(
            score,
            "Defensible moats identified, but must be proven.",
            "Moats are weak and easily replicated.",
            "No sustainable competitive advantages.",
        ),
        green_flags: green,
        red_flags: red,
        failure_modes: vec![
            "Well-funded competitor copies and outspends you".to_string(),
            "Incumbent leverages existing customer base to enter market".to_string(),
        ],
    }
}

fn scaling_bottlenecks(concept: &str) -> KeywordAnalysis {
    let mut green = Vec::new();
    let mut red = Vec::new();

    if contains_any(concept, &["complex", "custom", "bespoke", "manual"]) {
        red.push("High operational complexity limits scale");
    }
    if contains_any(concept, &["automated", "standardized", "self-service"]) {
        green.push("Operations designed for scale");
    }
    if contains_any(concept, &["specialized", "expert", "consultant"]) {
        red.push("Dependent on scarce specialized resources");
    }
    if contains_any(concept, &["platform", "tools", "enabling"]) {
        green.push("Enables scale through platform approach");
    }
    if contains_any(concept, &["local", "regulated", "licensed", "compliance"]) {
        red.push("Geographic or regulatory barriers to scale");
    }
    if contains_any(concept, &["global", "cloud", "distributed"]) {
        green.push("Geographic expansion potential");
    }

    let score = clamp_score(5.0 + green.len() as f64 * 2.0 - red.len() as f64 * 2.0);
    KeywordAnalysis {
        score,
        band: band(
            score,
            "Scaling path appears relatively clear.",
            "Significant scaling challenges ahead.",
            "Fundamental scaling limitations.",
        ),
        green_flags: green,
        red_flags: red,
        failure_modes: vec![
            "Quality degradation as company scales".to_string(),
            "Infrastructure costs grow faster than revenue".to_string(),
        ],
    }
}
