// tests/scoring_test.rs
//
// Scorer properties: determinism, monotonicity, clamping, normalization
// safety, and one-to-one factor accounting.

mod test_utils;

use imagecheckr::core::{CompressionProfileMatcher, ForensicFindings, MatchProfiles, RiskScorer, Score};
use imagecheckr::{EngineError, IndicatorTag, RiskLevel, Severity, ValidationIssue};
use test_utils::findings_with_tags;

const TAMPER_TAGS: [IndicatorTag; 5] = [
    IndicatorTag::Clone,
    IndicatorTag::ResamplingDetected,
    IndicatorTag::MedianFilterDetected,
    IndicatorTag::NoiseInconsistency,
    IndicatorTag::ColorTemperature,
];

#[test]
fn test_scoring_is_deterministic() {
    let findings = findings_with_tags(320.0, &[IndicatorTag::Clone, IndicatorTag::EdgeInconsistency]);
    let issues = vec![ValidationIssue::new("structure", Severity::High, "missing footer")];
    let scorer = RiskScorer::new();

    let first = scorer.score(Some(&findings), &[], &issues).unwrap();
    let second = scorer.score(Some(&findings), &[], &issues).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_score_is_monotone_in_tamper_indicators() {
    let scorer = RiskScorer::new();
    let mut previous = 0.0;
    for k in 0..=TAMPER_TAGS.len() {
        let findings = findings_with_tags(50.0, &TAMPER_TAGS[..k]);
        let score = scorer.score(Some(&findings), &[], &[]).unwrap();
        assert!(
            score.overall_score >= previous,
            "adding indicator #{k} lowered the score"
        );
        previous = score.overall_score;
    }
}

#[test]
fn test_overloaded_findings_clamp_to_hundred() {
    let mut findings = findings_with_tags(
        10.0,
        &[
            IndicatorTag::Clone,
            IndicatorTag::ResamplingDetected,
            IndicatorTag::MedianFilterDetected,
            IndicatorTag::NoiseInconsistency,
            IndicatorTag::ColorTemperature,
            IndicatorTag::EdgeInconsistency,
            IndicatorTag::LowColorCorrelation,
        ],
    );
    findings.ela_interpretation.risk_boost = 12;
    findings.quantization_signal = Some(imagecheckr::core::analysis::QuantizationSignal {
        average: 55.0,
        variance: 4.0,
        label: "heavy quantization".to_string(),
    });
    findings.indicator_tags.insert(IndicatorTag::HighQuantization);

    let issues: Vec<ValidationIssue> = (0..20)
        .map(|i| ValidationIssue::new("format", Severity::Critical, format!("issue {i}")))
        .collect();

    let score = RiskScorer::new().score(Some(&findings), &[], &issues).unwrap();
    assert!(score.overall_score <= 100.0);
    assert!(score.overall_score >= 0.0);
    assert_eq!(score.risk_level, RiskLevel::Critical);
}

#[test]
fn test_normalization_never_applies_with_tamper_evidence() {
    let scorer = RiskScorer::new();
    let matches = CompressionProfileMatcher.matches(90.0, 1080, 1080);
    assert!(!matches.is_empty());

    for tag in TAMPER_TAGS {
        let findings = findings_with_tags(90.0, &[tag]);
        let with_matches = scorer.score(Some(&findings), &matches, &[]).unwrap();
        let without_matches = scorer.score(Some(&findings), &[], &[]).unwrap();

        assert!(with_matches.normalization_note.is_none(), "{tag} ignored");
        assert_eq!(with_matches.overall_score, without_matches.overall_score);
    }
}

#[test]
fn test_normalization_tiers_follow_ela_variance() {
    let scorer = RiskScorer::new();

    // keep 40% below variance 100
    let low = findings_with_tags(90.0, &[IndicatorTag::EdgeInconsistency]);
    let matches = CompressionProfileMatcher.matches(90.0, 1080, 1080);
    let score = scorer.score(Some(&low), &matches, &[]).unwrap();
    assert!((score.overall_score - 6.0 * 0.40).abs() < 1e-9);

    // keep 50% below variance 200
    let mid = findings_with_tags(150.0, &[IndicatorTag::EdgeInconsistency]);
    let matches = CompressionProfileMatcher.matches(150.0, 1080, 1080);
    let score = scorer.score(Some(&mid), &matches, &[]).unwrap();
    assert!((score.overall_score - 6.0 * 0.50).abs() < 1e-9);

    // keep 65% above
    let high = findings_with_tags(250.0, &[IndicatorTag::EdgeInconsistency]);
    let matches = CompressionProfileMatcher.matches(250.0, 2048, 2048);
    assert!(!matches.is_empty());
    let score = scorer.score(Some(&high), &matches, &[]).unwrap();
    assert!((score.overall_score - 6.0 * 0.65).abs() < 1e-9);
}

#[test]
fn test_every_triggered_signal_contributes_exactly_once() {
    let mut findings = findings_with_tags(
        10.0,
        &[
            IndicatorTag::Clone,
            IndicatorTag::ResamplingDetected,
            IndicatorTag::MedianFilterDetected,
            IndicatorTag::NoiseInconsistency,
            IndicatorTag::ColorTemperature,
            IndicatorTag::EdgeInconsistency,
            IndicatorTag::LowColorCorrelation,
        ],
    );
    findings.ela_interpretation.risk_boost = 12;
    findings.ela_interpretation.message = "Extremely low error level".to_string();
    findings.quantization_signal = Some(imagecheckr::core::analysis::QuantizationSignal {
        average: 55.0,
        variance: 4.0,
        label: "heavy quantization".to_string(),
    });
    findings.indicator_tags.insert(IndicatorTag::HighQuantization);

    let score = RiskScorer::new().score(Some(&findings), &[], &[]).unwrap();

    // ELA band + extreme-variance bonus + 3 pixel anomalies + 5 indicators
    assert_eq!(score.contributing_factors.len(), 10);

    let mut descriptions: Vec<&str> = score
        .contributing_factors
        .iter()
        .map(|f| f.factor.as_str())
        .collect();
    let before = descriptions.len();
    descriptions.sort_unstable();
    descriptions.dedup();
    assert_eq!(descriptions.len(), before, "duplicate factor entries");
}

#[test]
fn test_no_domains_is_an_explicit_error() {
    let result = RiskScorer::new().score(None, &[], &[]);
    assert!(matches!(result, Err(EngineError::NothingToScore)));
}

#[test]
fn test_absent_image_domain_is_excluded_not_zeroed() {
    // a single critical structure issue scores identically whether or not
    // other domains could have existed
    let issues = vec![ValidationIssue::new(
        "structure",
        Severity::Critical,
        "document incomplete",
    )];
    let score = RiskScorer::new().score(None, &[], &issues).unwrap();
    // 100 * 0.15 within the only present domain
    assert!((score.overall_score - 15.0).abs() < 1e-9);
}

#[test]
fn test_confidence_grows_with_corroborating_domains() {
    let findings = ForensicFindings::neutral(50.0);
    let scorer = RiskScorer::new();

    let one = scorer.score(Some(&findings), &[], &[]).unwrap();
    let two = scorer
        .score(
            Some(&findings),
            &[],
            &[ValidationIssue::new("format", Severity::Low, "typos")],
        )
        .unwrap();
    let four = scorer
        .score(
            Some(&findings),
            &[],
            &[
                ValidationIssue::new("format", Severity::Low, "typos"),
                ValidationIssue::new("structure", Severity::Low, "sections"),
                ValidationIssue::new("content", Severity::Low, "readability"),
            ],
        )
        .unwrap();

    assert_eq!(one.confidence, 0.60);
    assert_eq!(two.confidence, 0.75);
    assert_eq!(four.confidence, 0.90);
    assert!(one.confidence < two.confidence && two.confidence < four.confidence);
}
