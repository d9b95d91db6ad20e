// src/core/analyzer.rs
//
// Corroboration orchestrator: decode -> detect -> match -> score, then
// assemble the externally visible report. No algorithmic content of its
// own; components are injected through one-capability traits so any of
// them can be substituted without touching this layer.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::core::analysis::ElaLevel;
use crate::core::compression::{CompressionProfileMatch, CompressionProfileMatcher, MatchProfiles};
use crate::core::decoder::{Decode, ImageSample, StdImageDecoder};
use crate::core::engine::{Detect, ForensicFindings, TamperingDetectionEngine};
use crate::core::scorer::{RiskScorer, Score};
use crate::detection::{RiskScore, Severity, ValidationIssue};
use crate::error::EngineError;

/// Verdict handed over by an external AI-detection collaborator; passed
/// through to the report untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiDetection {
    pub is_ai_generated: bool,
    pub confidence: f64,
}

/// Findings from the out-of-scope collaborators, supplied alongside the
/// image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalFindings {
    /// Issues from the text/structure/content validators.
    pub validation_issues: Vec<ValidationIssue>,
    pub ai_detection: Option<AiDetection>,
    /// Hit count from an external reverse-image-search collaborator.
    pub reverse_image_matches: Option<u32>,
}

/// Externally visible analysis result. Serializable with stable field
/// names; crosses the process boundary to dashboards and audit logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorroborationReport {
    pub is_authentic: bool,
    pub is_ai_generated: bool,
    pub ai_detection_confidence: f64,
    pub is_tampered: bool,
    pub tampering_confidence: f64,
    pub reverse_image_matches: u32,
    /// Quantization and other encoding-parameter observations.
    pub metadata_issues: Vec<ValidationIssue>,
    /// Triggered forensic signals in issue form for uniform downstream
    /// handling.
    pub forensic_findings: Vec<ValidationIssue>,
    pub findings: ForensicFindings,
    pub profile_matches: Vec<CompressionProfileMatch>,
    pub risk: RiskScore,
}

/// Builder for a configured analyzer (default components).
pub struct AnalyzerBuilder {
    thresholds: Thresholds,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn build(self) -> CorroborationAnalyzer {
        CorroborationAnalyzer {
            thresholds: self.thresholds,
            decoder: StdImageDecoder,
            engine: TamperingDetectionEngine::new(),
            matcher: CompressionProfileMatcher,
            scorer: RiskScorer::new(),
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The orchestration layer over the four capability traits.
pub struct CorroborationAnalyzer<
    D = StdImageDecoder,
    E = TamperingDetectionEngine,
    M = CompressionProfileMatcher,
    S = RiskScorer,
> {
    thresholds: Thresholds,
    decoder: D,
    engine: E,
    matcher: M,
    scorer: S,
}

impl CorroborationAnalyzer {
    /// Analyzer with default components and calibration.
    pub fn new() -> Self {
        AnalyzerBuilder::new().build()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }
}

impl Default for CorroborationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E, M, S> CorroborationAnalyzer<D, E, M, S>
where
    D: Decode,
    E: Detect,
    M: MatchProfiles,
    S: Score,
{
    /// Analyzer with substituted components (e.g. a faster transform
    /// backend inside a custom engine).
    pub fn with_components(thresholds: Thresholds, decoder: D, engine: E, matcher: M, scorer: S) -> Self {
        Self {
            thresholds,
            decoder,
            engine,
            matcher,
            scorer,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Decode raw bytes, then analyze.
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        remote_origin: bool,
        external: &ExternalFindings,
    ) -> Result<CorroborationReport, EngineError> {
        let sample = self.decoder.decode(bytes, remote_origin)?;
        self.analyze_sample(&sample, external)
    }

    /// Analyze a decoded sample.
    pub fn analyze_sample(
        &self,
        sample: &ImageSample,
        external: &ExternalFindings,
    ) -> Result<CorroborationReport, EngineError> {
        let findings = self.engine.detect(sample, &self.thresholds);
        let profile_matches =
            self.matcher
                .matches(findings.ela_variance, sample.width, sample.height);
        let risk = self.scorer.score(
            Some(&findings),
            &profile_matches,
            &external.validation_issues,
        )?;

        let report = assemble_report(findings, profile_matches, risk, external);
        info!(
            "analysis complete: score={:.1} ({:?}), tampered={}, authentic={}",
            report.risk.overall_score,
            report.risk.risk_level,
            report.is_tampered,
            report.is_authentic
        );
        Ok(report)
    }
}

fn assemble_report(
    findings: ForensicFindings,
    profile_matches: Vec<CompressionProfileMatch>,
    risk: RiskScore,
    external: &ExternalFindings,
) -> CorroborationReport {
    let metadata_issues = metadata_issues(&findings);
    let forensic_issues = forensic_issues(&findings);

    let tamper_indicators = findings
        .indicator_tags
        .iter()
        .filter(|t| t.is_tamper_evidence())
        .count();
    let ela_high_risk = findings.ela_interpretation.level == ElaLevel::HighRisk;
    let is_tampered = tamper_indicators > 0 || ela_high_risk;
    let tampering_confidence = match tamper_indicators {
        0 if ela_high_risk => 0.5,
        0 => 0.0,
        1 => 0.6,
        _ => 0.85,
    };

    let (is_ai_generated, ai_detection_confidence) = external
        .ai_detection
        .map(|d| (d.is_ai_generated, d.confidence))
        .unwrap_or((false, 0.0));
    let reverse_image_matches = external.reverse_image_matches.unwrap_or(0);

    let is_authentic = !(is_tampered || is_ai_generated || reverse_image_matches > 5);

    CorroborationReport {
        is_authentic,
        is_ai_generated,
        ai_detection_confidence,
        is_tampered,
        tampering_confidence,
        reverse_image_matches,
        metadata_issues,
        forensic_findings: forensic_issues,
        findings,
        profile_matches,
        risk,
    }
}

fn metadata_issues(findings: &ForensicFindings) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if let Some(signal) = &findings.quantization_signal {
        issues.push(
            ValidationIssue::new(
                "metadata",
                Severity::Medium,
                format!("Quantization tables: {}", signal.label),
            )
            .with_detail("average", format!("{:.1}", signal.average))
            .with_detail("variance", format!("{:.1}", signal.variance)),
        );
    }
    issues
}

fn forensic_issues(findings: &ForensicFindings) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |severity: Severity, description: String, method: &str| {
        issues.push(
            ValidationIssue::new("forensic", severity, description)
                .with_detail("detection_method", method),
        );
    };

    let ela = &findings.ela_interpretation;
    if ela.risk_boost > 0 {
        let severity = match ela.level {
            ElaLevel::HighRisk => Severity::Critical,
            ElaLevel::MediumRisk => Severity::High,
            _ => Severity::Low,
        };
        push(severity, ela.message.clone(), "error_level_analysis");
    }
    if findings.clone_matches > 0 {
        push(
            Severity::High,
            format!(
                "Detected potentially cloned/copied regions ({} block pairs)",
                findings.clone_matches
            ),
            "region_hashing",
        );
    }
    if findings.is_resampled {
        push(
            Severity::High,
            "Periodic frequency-domain peaks suggest resizing/resampling".to_string(),
            "fft_peak_analysis",
        );
    }
    if findings.is_median_filtered {
        push(
            Severity::Medium,
            "Strong median filtering/smoothing detected".to_string(),
            "median_filter_comparison",
        );
    }
    if findings
        .indicator_tags
        .contains(&crate::detection::IndicatorTag::LowColorCorrelation)
    {
        push(
            Severity::Medium,
            format!(
                "Low color-channel correlation ({:.2})",
                findings.color_correlation
            ),
            "channel_correlation",
        );
    }
    if findings.color_temperature_issue {
        push(
            Severity::Medium,
            "Lighting/color-temperature inconsistency detected".to_string(),
            "channel_balance",
        );
    }
    if findings
        .indicator_tags
        .contains(&crate::detection::IndicatorTag::NoiseInconsistency)
    {
        push(
            Severity::Medium,
            format!(
                "Uneven noise distribution (ratio {:.2})",
                findings.noise_ratio
            ),
            "regional_noise_variance",
        );
    }
    if findings.edge_consistency_issue {
        push(
            Severity::Medium,
            "Edge structures differ significantly between passes".to_string(),
            "dual_edge_filters",
        );
    }

    issues
}
