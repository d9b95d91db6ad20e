// src/core/scorer.rs
//
// Risk scoring: aggregates image forensics, compression profile matches,
// and findings from the external validation domains into one normalized,
// auditable score.
//
// The score is assembled per domain, weighted, and renormalized over the
// domains actually present, so a missing domain is excluded rather than
// read as zero risk. Every signal that moves the score is appended to
// contributing_factors in application order.

use log::debug;

use crate::core::compression::CompressionProfileMatch;
use crate::core::engine::ForensicFindings;
use crate::detection::{
    ContributingFactor, IndicatorTag, RiskLevel, RiskScore, Severity, ValidationIssue,
};
use crate::error::EngineError;

const IMAGE_DOMAIN: &str = "image_forensics";

/// Per-issue scaling for external validation domains.
const EXTERNAL_ISSUE_SCALE: f64 = 0.15;

/// Flat point impacts for the tamper indicators, applied in this order.
const TAG_IMPACTS: [(IndicatorTag, f64, Severity); 5] = [
    (IndicatorTag::Clone, 20.0, Severity::High),
    (IndicatorTag::ResamplingDetected, 15.0, Severity::High),
    (IndicatorTag::MedianFilterDetected, 12.0, Severity::Medium),
    (IndicatorTag::NoiseInconsistency, 10.0, Severity::Medium),
    (IndicatorTag::ColorTemperature, 10.0, Severity::Medium),
];

/// Points per statistical pixel anomaly (low correlation, edge
/// disagreement, quantization signal).
const PIXEL_ANOMALY_IMPACT: f64 = 6.0;

/// Extra points when the ELA variance sits at a physical extreme.
const EXTREME_ELA_IMPACT: f64 = 5.0;

/// Capability trait for the scoring step.
pub trait Score {
    fn score(
        &self,
        image_findings: Option<&ForensicFindings>,
        profile_matches: &[CompressionProfileMatch],
        other_issues: &[ValidationIssue],
    ) -> Result<RiskScore, EngineError>;
}

/// Domain weights for the base score. Image forensics dominates when
/// present; unknown external categories fall back to the format weight.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainWeights {
    pub image_forensics: f64,
    pub structure: f64,
    pub content: f64,
    pub format: f64,
}

impl Default for DomainWeights {
    fn default() -> Self {
        Self {
            image_forensics: 0.40,
            structure: 0.25,
            content: 0.20,
            format: 0.15,
        }
    }
}

impl DomainWeights {
    fn for_category(&self, category: &str) -> f64 {
        match category {
            "structure" => self.structure,
            "content" => self.content,
            _ => self.format,
        }
    }
}

/// Default risk scorer.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: DomainWeights,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: DomainWeights) -> Self {
        Self { weights }
    }

    /// Score the image-forensics domain, appending factors in the order the
    /// signals are applied.
    fn score_image_domain(
        &self,
        findings: &ForensicFindings,
        factors: &mut Vec<ContributingFactor>,
    ) -> f64 {
        let mut score = 0.0;
        let push = |factors: &mut Vec<ContributingFactor>,
                        factor: String,
                        severity: Severity,
                        impact: f64| {
            factors.push(ContributingFactor {
                component: IMAGE_DOMAIN.to_string(),
                factor,
                severity,
                impact,
            });
        };

        let ela = &findings.ela_interpretation;
        if ela.risk_boost > 0 {
            let severity = match ela.risk_boost {
                b if b >= 12 => Severity::High,
                b if b >= 6 => Severity::Medium,
                _ => Severity::Low,
            };
            score += ela.risk_boost as f64;
            push(factors, ela.message.clone(), severity, ela.risk_boost as f64);
        }
        if findings.ela_variance < 15.0 || findings.ela_variance > 1000.0 {
            score += EXTREME_ELA_IMPACT;
            push(
                factors,
                format!("ELA variance at physical extreme ({:.1})", findings.ela_variance),
                Severity::Low,
                EXTREME_ELA_IMPACT,
            );
        }

        if findings.indicator_tags.contains(&IndicatorTag::LowColorCorrelation) {
            score += PIXEL_ANOMALY_IMPACT;
            push(
                factors,
                format!(
                    "Low color-channel correlation ({:.2})",
                    findings.color_correlation
                ),
                Severity::Medium,
                PIXEL_ANOMALY_IMPACT,
            );
        }
        if findings.edge_consistency_issue {
            score += PIXEL_ANOMALY_IMPACT;
            push(
                factors,
                "Edge structures disagree between detection passes".to_string(),
                Severity::Medium,
                PIXEL_ANOMALY_IMPACT,
            );
        }
        if let Some(signal) = &findings.quantization_signal {
            score += PIXEL_ANOMALY_IMPACT;
            push(
                factors,
                format!("Quantization tables: {}", signal.label),
                Severity::Medium,
                PIXEL_ANOMALY_IMPACT,
            );
        }

        for (tag, impact, severity) in TAG_IMPACTS {
            if findings.indicator_tags.contains(&tag) {
                score += impact;
                let factor = match tag {
                    IndicatorTag::Clone => format!(
                        "Cloned regions detected ({} block pairs)",
                        findings.clone_matches
                    ),
                    IndicatorTag::ResamplingDetected => {
                        "Periodic frequency-domain peaks indicate resampling".to_string()
                    }
                    IndicatorTag::MedianFilterDetected => {
                        "Median filtering/smoothing detected".to_string()
                    }
                    IndicatorTag::NoiseInconsistency => format!(
                        "Spatially inconsistent noise (ratio {:.2})",
                        findings.noise_ratio
                    ),
                    IndicatorTag::ColorTemperature => {
                        "Inconsistent color temperature across channels".to_string()
                    }
                    _ => tag.as_str().to_string(),
                };
                push(factors, factor, severity, impact);
            }
        }

        score.min(100.0)
    }

    fn score_external_domain(
        &self,
        category: &str,
        issues: &[&ValidationIssue],
        factors: &mut Vec<ContributingFactor>,
    ) -> f64 {
        let mut score = 0.0;
        for issue in issues {
            let impact = issue.severity.score() * EXTERNAL_ISSUE_SCALE;
            score += impact;
            factors.push(ContributingFactor {
                component: category.to_string(),
                factor: issue.description.clone(),
                severity: issue.severity,
                impact,
            });
        }
        score.min(100.0)
    }

    fn confidence(&self, domain_count: usize, image_signals: usize) -> f64 {
        let base = match domain_count {
            0 | 1 => 0.60,
            2 => 0.75,
            3 => 0.85,
            _ => 0.90,
        };
        let corroborated: f64 = if image_signals >= 3 { base + 0.05 } else { base };
        corroborated.min(0.95)
    }

    fn recommendations(
        &self,
        level: RiskLevel,
        findings: Option<&ForensicFindings>,
    ) -> Vec<String> {
        let mut recs: Vec<String> = match level {
            RiskLevel::Critical => vec![
                "REJECT: strong evidence of manipulation".to_string(),
                "Immediate manual review required by compliance officer".to_string(),
            ],
            RiskLevel::High => vec![
                "HOLD: document requires thorough manual review".to_string(),
                "Request additional supporting documents".to_string(),
            ],
            RiskLevel::Medium => vec![
                "REVIEW: document has minor issues".to_string(),
                "Consider requesting clarification on flagged items".to_string(),
            ],
            RiskLevel::Low => vec![
                "ACCEPT: document appears legitimate".to_string(),
                "Proceed with standard processing".to_string(),
            ],
        };

        if let Some(findings) = findings {
            if findings.indicator_tags.contains(&IndicatorTag::Clone) {
                recs.push("Flag for fraud investigation".to_string());
                recs.push(
                    "Compare with the original document from the issuing authority".to_string(),
                );
            }
            if findings.indicator_tags.contains(&IndicatorTag::ResamplingDetected) {
                recs.push("Request original document or high-resolution scan".to_string());
            }
            if findings.ela_interpretation.risk_boost >= 12 {
                recs.push("Verify document through alternative channels".to_string());
            }
        }

        recs.truncate(10);
        recs
    }
}

impl Score for RiskScorer {
    fn score(
        &self,
        image_findings: Option<&ForensicFindings>,
        profile_matches: &[CompressionProfileMatch],
        other_issues: &[ValidationIssue],
    ) -> Result<RiskScore, EngineError> {
        if image_findings.is_none() && other_issues.is_empty() {
            return Err(EngineError::NothingToScore);
        }

        let mut factors = Vec::new();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut domain_count = 0usize;

        if let Some(findings) = image_findings {
            let domain_score = self.score_image_domain(findings, &mut factors);
            weighted_sum += domain_score * self.weights.image_forensics;
            weight_total += self.weights.image_forensics;
            domain_count += 1;
        }

        // group external issues by category, in stable category order
        let mut categories: Vec<&str> = other_issues.iter().map(|i| i.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        for category in categories {
            let issues: Vec<&ValidationIssue> = other_issues
                .iter()
                .filter(|i| i.category == category)
                .collect();
            let domain_score = self.score_external_domain(category, &issues, &mut factors);
            weighted_sum += domain_score * self.weights.for_category(category);
            weight_total += self.weights.for_category(category);
            domain_count += 1;
        }

        let base_score = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        };

        // benign-recompression normalization: a known lossy channel without
        // any independent tamper evidence keeps only part of the score
        let mut overall = base_score;
        let mut normalization_note = None;
        let likely_known_channel = profile_matches
            .iter()
            .any(|m| m.profile_id.is_lossy_channel());
        let has_tamper_evidence = image_findings
            .map(|f| f.has_real_tamper_evidence())
            .unwrap_or(false);

        if likely_known_channel && !has_tamper_evidence {
            let ela_variance = image_findings.map(|f| f.ela_variance).unwrap_or(0.0);
            let keep = if ela_variance < 100.0 {
                0.40
            } else if ela_variance < 200.0 {
                0.50
            } else {
                0.65
            };
            let channel = profile_matches
                .iter()
                .find(|m| m.profile_id.is_lossy_channel())
                .map(|m| m.label.clone())
                .unwrap_or_default();
            overall = base_score * keep;
            normalization_note = Some(format!(
                "Score reduced to {:.0}% of base ({:.1} -> {:.1}): compression signature matches \
                 {channel} and no independent tamper evidence was found",
                keep * 100.0,
                base_score,
                overall
            ));
            debug!("normalization applied: keep={keep}, channel={channel}");
        }

        let overall = overall.clamp(0.0, 100.0);
        let risk_level = RiskLevel::from_score(overall);
        let image_signals = image_findings
            .map(|f| f.triggered_signal_count())
            .unwrap_or(0);

        Ok(RiskScore {
            overall_score: overall,
            risk_level,
            confidence: self.confidence(domain_count, image_signals),
            contributing_factors: factors,
            recommendations: self.recommendations(risk_level, image_findings),
            normalization_note,
        })
    }
}
