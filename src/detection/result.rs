//! Result vocabulary shared by the scorer, orchestrator, and report consumers.
//!
//! Everything here crosses a process/API boundary downstream, so field and
//! variant names are stable and every type derives Serialize/Deserialize.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity attached to an individual validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Base points contributed by an issue of this severity before domain
    /// scaling is applied.
    pub fn score(&self) -> f64 {
        match self {
            Severity::Low => 10.0,
            Severity::Medium => 30.0,
            Severity::High => 60.0,
            Severity::Critical => 100.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Low => "ℹ",
            Severity::Medium => "⚠",
            Severity::High => "⚠",
            Severity::Critical => "✗",
        }
    }
}

/// Risk bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Deterministic, monotonic mapping from score to level.
    /// Boundaries: 40 → LOW, 41 → MEDIUM, 70 → MEDIUM, 71 → HIGH,
    /// 85 → HIGH, 86 → CRITICAL.
    pub fn from_score(score: f64) -> Self {
        if score >= 86.0 {
            RiskLevel::Critical
        } else if score >= 71.0 {
            RiskLevel::High
        } else if score >= 41.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low risk",
            RiskLevel::Medium => "Medium risk",
            RiskLevel::High => "High risk",
            RiskLevel::Critical => "Critical risk",
        }
    }
}

/// Machine-readable indicator derived from the forensic probes.
///
/// Serialized names are the stable wire tags consumed by the scorer and by
/// downstream alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorTag {
    #[serde(rename = "CLONE")]
    Clone,
    #[serde(rename = "RESAMPLING_DETECTED")]
    ResamplingDetected,
    #[serde(rename = "MEDIAN_FILTER_DETECTED")]
    MedianFilterDetected,
    #[serde(rename = "COLOR_TEMPERATURE")]
    ColorTemperature,
    #[serde(rename = "NOISE_INCONSISTENCY")]
    NoiseInconsistency,
    #[serde(rename = "EDGE_INCONSISTENCY")]
    EdgeInconsistency,
    #[serde(rename = "LOW_COLOR_CORRELATION")]
    LowColorCorrelation,
    #[serde(rename = "HIGH_QUANTIZATION")]
    HighQuantization,
    #[serde(rename = "UNIFORM_QUANTIZATION")]
    UniformQuantization,
}

impl IndicatorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorTag::Clone => "CLONE",
            IndicatorTag::ResamplingDetected => "RESAMPLING_DETECTED",
            IndicatorTag::MedianFilterDetected => "MEDIAN_FILTER_DETECTED",
            IndicatorTag::ColorTemperature => "COLOR_TEMPERATURE",
            IndicatorTag::NoiseInconsistency => "NOISE_INCONSISTENCY",
            IndicatorTag::EdgeInconsistency => "EDGE_INCONSISTENCY",
            IndicatorTag::LowColorCorrelation => "LOW_COLOR_CORRELATION",
            IndicatorTag::HighQuantization => "HIGH_QUANTIZATION",
            IndicatorTag::UniformQuantization => "UNIFORM_QUANTIZATION",
        }
    }

    /// Whether this tag counts as independent evidence of tampering.
    ///
    /// Only these tags block the benign-recompression score normalization;
    /// the remaining tags describe pixel statistics that recompression alone
    /// can produce.
    pub fn is_tamper_evidence(&self) -> bool {
        matches!(
            self,
            IndicatorTag::Clone
                | IndicatorTag::ResamplingDetected
                | IndicatorTag::MedianFilterDetected
                | IndicatorTag::ColorTemperature
                | IndicatorTag::NoiseInconsistency
        )
    }
}

impl std::fmt::Display for IndicatorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issue reported by a validation domain (image forensics or any of the
/// external text/structure/content validators).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl ValidationIssue {
    pub fn new(category: impl Into<String>, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            severity,
            description: description.into(),
            location: None,
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// One signal that moved the risk score, in the order it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    /// Validation domain the signal came from (e.g. `image_forensics`).
    pub component: String,
    /// Human-readable description of the signal.
    pub factor: String,
    pub severity: Severity,
    /// Points the signal added within its domain, before domain weighting.
    pub impact: f64,
}

/// Externally visible scoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Final score, always clamped to [0, 100].
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    /// Confidence in the assessment, [0, 1]; grows with the number of
    /// corroborating validation domains.
    pub confidence: f64,
    pub contributing_factors: Vec<ContributingFactor>,
    pub recommendations: Vec<String>,
    /// Present iff the benign-recompression normalization reduced the score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(41.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(71.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(85.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(86.0), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Critical);
    }

    #[test]
    fn test_severity_scores_are_ordered() {
        assert!(Severity::Low.score() < Severity::Medium.score());
        assert!(Severity::Medium.score() < Severity::High.score());
        assert!(Severity::High.score() < Severity::Critical.score());
    }

    #[test]
    fn test_tamper_evidence_tags() {
        assert!(IndicatorTag::Clone.is_tamper_evidence());
        assert!(IndicatorTag::ResamplingDetected.is_tamper_evidence());
        assert!(IndicatorTag::NoiseInconsistency.is_tamper_evidence());
        // statistical anomalies alone never block normalization
        assert!(!IndicatorTag::EdgeInconsistency.is_tamper_evidence());
        assert!(!IndicatorTag::LowColorCorrelation.is_tamper_evidence());
        assert!(!IndicatorTag::HighQuantization.is_tamper_evidence());
    }

    #[test]
    fn test_tag_wire_names() {
        let json = serde_json::to_string(&IndicatorTag::ResamplingDetected).unwrap();
        assert_eq!(json, "\"RESAMPLING_DETECTED\"");
        assert_eq!(IndicatorTag::Clone.as_str(), "CLONE");
    }
}
