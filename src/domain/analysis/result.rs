//! Analysis result projection

use serde::{Deserialize, Serialize};

/// The analysis returned by the remote service.
///
/// Field values are copied verbatim. Strength and risk fields are opaque
/// display strings such as "65% strong".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub risk_level: String,
    pub disclaimer: String,
    pub plaintiff_strength: String,
    pub defendant_strength: String,
    pub legal_issues: Vec<String>,
    pub strong_points: Vec<String>,
    pub weak_points: Vec<String>,
    pub law_sections: Vec<String>,
}

impl AnalysisResult {
    /// Numeric strengths for charting
    pub fn strength_comparison(&self) -> StrengthComparison {
        StrengthComparison::from_result(self)
    }
}

/// Plaintiff and defendant strengths extracted for a chart.
/// Presentation support only; the result keeps the raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrengthComparison {
    pub plaintiff: u32,
    pub defendant: u32,
}

impl StrengthComparison {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            plaintiff: parse_percentage(&result.plaintiff_strength),
            defendant: parse_percentage(&result.defendant_strength),
        }
    }
}

/// Extract the first run of ASCII digits as an integer.
///
/// "65% strong" gives 65. No digits, or a number too large for u32, gives 0.
pub fn parse_percentage(value: &str) -> u32 {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}
