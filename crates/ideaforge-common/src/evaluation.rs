use serde::{Deserialize, Serialize};

use crate::{RAW_EXCERPT_CHARS, truncate_chars};

/// Pass/fail outcome of a critique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    #[serde(alias = "pass", alias = "Pass")]
    Pass,
    #[default]
    #[serde(alias = "fail", alias = "Fail")]
    Fail,
}

impl Verdict {
    /// `Pass` iff `score >= threshold`. The threshold is inclusive.
    pub fn for_score(score: f64, threshold: u8) -> Self {
        if score >= f64::from(threshold) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-dimension critic scores on a 0–10 scale.
///
/// Field order is the declaration order used to break ties when ranking
/// dimensions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    #[serde(default)]
    pub innovation: f64,
    #[serde(default)]
    pub feasibility: f64,
    #[serde(default)]
    pub impact: f64,
    #[serde(default)]
    pub demo_potential: f64,
    #[serde(default)]
    pub technical_depth: f64,
    #[serde(default)]
    pub market_fit: f64,
}

impl DimensionScores {
    /// Dimensions paired with their scores, in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("innovation", self.innovation),
            ("feasibility", self.feasibility),
            ("impact", self.impact),
            ("demo_potential", self.demo_potential),
            ("technical_depth", self.technical_depth),
            ("market_fit", self.market_fit),
        ]
    }

    /// The `n` lowest-scoring dimensions, ascending. Equal scores keep
    /// declaration order.
    pub fn weakest(&self, n: usize) -> Vec<(&'static str, f64)> {
        let mut entries = self.entries().to_vec();
        // sort_by is stable
        entries.sort_by(|a, b| a.1.total_cmp(&b.1));
        entries.truncate(n);
        entries
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Structured critique of one idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub scores: DimensionScores,
    pub overall_score: f64,
    #[serde(default)]
    pub verdict: Verdict,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    #[serde(default)]
    pub killer_feature_idea: Option<String>,
    #[serde(default)]
    pub reasoning: String,
    /// Set only on the sentinel produced when the critic reply was unusable.
    #[serde(default, skip_serializing_if = "is_false")]
    pub parse_failed: bool,
}

impl Evaluation {
    /// Sentinel evaluation for a critic reply that could not be parsed.
    pub fn unparsed(raw: &str) -> Self {
        Self {
            scores: DimensionScores::default(),
            overall_score: 0.0,
            verdict: Verdict::Fail,
            strengths: Vec::new(),
            weaknesses: vec!["Failed to parse evaluation".to_string()],
            improvement_suggestions: vec!["Please try again".to_string()],
            killer_feature_idea: None,
            reasoning: truncate_chars(raw, RAW_EXCERPT_CHARS).to_string(),
            parse_failed: true,
        }
    }

    /// Replace whatever verdict the upstream reply claimed with the one
    /// implied by `overall_score` and `threshold`.
    pub fn with_verdict_for(mut self, threshold: u8) -> Self {
        self.verdict = Verdict::for_score(self.overall_score, threshold);
        self
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}
