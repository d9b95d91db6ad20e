// src/core/engine.rs
//
// Tampering detection engine: runs the independent forensic probes over a
// decoded sample and folds their outputs into one findings record.
//
// The probes share nothing but the input raster and the calibration, so
// they are dispatched onto the rayon pool and joined; a slow transform on
// one request never stalls another. No probe aborts the analysis: unmet
// preconditions degrade to neutral values plus a diagnostic note.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::core::analysis::{clone, color, edges, ela, noise, quantization, resampling, smoothing};
use crate::core::analysis::{ElaInterpretation, ElaLevel, QuantizationSignal};
use crate::core::decoder::ImageSample;
use crate::core::dsp::{RustFftBackend, SpectrumBackend};
use crate::detection::IndicatorTag;

/// One findings record per analysis, consumed by the risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicFindings {
    /// Variance of the amplified re-compression error map.
    pub ela_variance: f64,
    pub ela_interpretation: ElaInterpretation,
    /// Count of block-hash collisions beyond the minimum separation.
    pub clone_matches: u32,
    pub is_resampled: bool,
    pub is_median_filtered: bool,
    /// Mean pairwise channel correlation, [-1, 1].
    pub color_correlation: f64,
    pub color_temperature_issue: bool,
    /// Max/min regional noise variance, >= 1.
    pub noise_ratio: f64,
    pub edge_consistency_issue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantization_signal: Option<QuantizationSignal>,
    /// Normalized machine-readable tags derived from the fields above.
    pub indicator_tags: BTreeSet<IndicatorTag>,
    /// Notes from probes that degraded instead of running.
    pub diagnostics: Vec<String>,
}

impl ForensicFindings {
    /// Whether any independent tamper indicator fired. Only these block the
    /// benign-recompression normalization downstream.
    pub fn has_real_tamper_evidence(&self) -> bool {
        self.indicator_tags.iter().any(|t| t.is_tamper_evidence())
    }

    /// Number of signals that crossed their threshold (ELA band included).
    pub fn triggered_signal_count(&self) -> usize {
        let ela = usize::from(self.ela_interpretation.risk_boost > 0);
        ela + self.indicator_tags.len()
    }
}

/// Capability trait for the detection step.
pub trait Detect {
    /// Run all probes. Never mutates the sample; pure function of the
    /// sample plus the thresholds.
    fn detect(&self, sample: &ImageSample, thresholds: &Thresholds) -> ForensicFindings;
}

/// Default engine, generic over the frequency-transform backend so a faster
/// implementation can be substituted without touching callers.
#[derive(Debug, Clone, Default)]
pub struct TamperingDetectionEngine<B: SpectrumBackend = RustFftBackend> {
    spectrum: B,
}

impl TamperingDetectionEngine {
    pub fn new() -> Self {
        Self {
            spectrum: RustFftBackend,
        }
    }
}

impl<B: SpectrumBackend> TamperingDetectionEngine<B> {
    pub fn with_backend(spectrum: B) -> Self {
        Self { spectrum }
    }
}

impl<B: SpectrumBackend + Sync> Detect for TamperingDetectionEngine<B> {
    fn detect(&self, sample: &ImageSample, thresholds: &Thresholds) -> ForensicFindings {
        let gray = sample.luma_image();

        let ((ela, clone_scan), ((resampled, smoothing), ((color, noise), (edge, quant)))) =
            rayon::join(
                || {
                    rayon::join(
                        || ela::analyze(sample, thresholds),
                        || clone::scan(&gray, thresholds),
                    )
                },
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || resampling::detect(&gray, thresholds, &self.spectrum),
                                || smoothing::detect(&gray, thresholds),
                            )
                        },
                        || {
                            rayon::join(
                                || {
                                    rayon::join(
                                        || color::analyze(sample, thresholds),
                                        || noise::analyze(&gray, thresholds),
                                    )
                                },
                                || {
                                    rayon::join(
                                        || edges::check(&gray, thresholds),
                                        || {
                                            quantization::inspect(
                                                sample.quantization_tables.as_ref(),
                                                thresholds,
                                            )
                                        },
                                    )
                                },
                            )
                        },
                    )
                },
            );

        let mut tags = BTreeSet::new();
        if clone_scan.match_count() >= 1 {
            tags.insert(IndicatorTag::Clone);
        }
        if resampled.is_resampled {
            tags.insert(IndicatorTag::ResamplingDetected);
        }
        if smoothing.is_median_filtered {
            tags.insert(IndicatorTag::MedianFilterDetected);
        }
        if color.temperature_issue {
            tags.insert(IndicatorTag::ColorTemperature);
        }
        if noise.inconsistent {
            tags.insert(IndicatorTag::NoiseInconsistency);
        }
        if edge.inconsistent {
            tags.insert(IndicatorTag::EdgeInconsistency);
        }
        if color.low_correlation {
            tags.insert(IndicatorTag::LowColorCorrelation);
        }
        match quant.verdict {
            Some(quantization::QuantizationVerdict::HighQuantization) => {
                tags.insert(IndicatorTag::HighQuantization);
            }
            Some(quantization::QuantizationVerdict::UniformQuantization) => {
                tags.insert(IndicatorTag::UniformQuantization);
            }
            None => {}
        }

        let mut diagnostics = Vec::new();
        if let Some(note) = ela.note.clone() {
            diagnostics.push(note);
        }
        if let Some(note) = clone_scan.note.clone() {
            diagnostics.push(note);
        }
        if let Some(note) = noise.note.clone() {
            diagnostics.push(note);
        }

        debug!(
            "probes complete: ela_var={:.1} ({:?}), clones={}, resampled={}, \
             median={}, corr={:.3}, noise_ratio={:.2}, edge_diff={:.1}, tags={:?}",
            ela.variance,
            ela.interpretation.level,
            clone_scan.match_count(),
            resampled.is_resampled,
            smoothing.is_median_filtered,
            color.correlation,
            noise.ratio,
            edge.mean_diff,
            tags
        );

        ForensicFindings {
            ela_variance: ela.variance,
            ela_interpretation: ela.interpretation,
            clone_matches: clone_scan.match_count(),
            is_resampled: resampled.is_resampled,
            is_median_filtered: smoothing.is_median_filtered,
            color_correlation: color.correlation,
            color_temperature_issue: color.temperature_issue,
            noise_ratio: noise.ratio,
            edge_consistency_issue: edge.inconsistent,
            quantization_signal: quant.signal,
            indicator_tags: tags,
            diagnostics,
        }
    }
}

/// Convenience constructor for findings in tests and fixtures: everything
/// neutral, ELA in the normal band.
impl ForensicFindings {
    pub fn neutral(ela_variance: f64) -> Self {
        Self {
            ela_variance,
            ela_interpretation: ElaInterpretation {
                level: ElaLevel::Normal,
                message: "Normal compression pattern".to_string(),
                risk_boost: 0,
            },
            clone_matches: 0,
            is_resampled: false,
            is_median_filtered: false,
            color_correlation: 0.95,
            color_temperature_issue: false,
            noise_ratio: 1.0,
            edge_consistency_issue: false,
            quantization_signal: None,
            indicator_tags: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise_sample(width: u32, height: u32, seed: u32) -> ImageSample {
        let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let v = (state >> 24) as u8;
                [v, v, v]
            })
            .collect();
        ImageSample::from_rgb8(pixels, width, height, false, None, false).unwrap()
    }

    #[test]
    fn test_detect_is_deterministic() {
        let sample = noise_sample(128, 128, 7);
        let engine = TamperingDetectionEngine::new();
        let t = Thresholds::default();

        let a = engine.detect(&sample, &t);
        let b = engine.detect(&sample, &t);
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_jpeg_sample_omits_quantization_signal() {
        let sample = noise_sample(96, 96, 9);
        let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
        assert!(findings.quantization_signal.is_none());
        assert!(!findings.indicator_tags.contains(&IndicatorTag::HighQuantization));
    }

    #[test]
    fn test_tiny_sample_degrades_with_diagnostics() {
        let sample = noise_sample(8, 8, 11);
        let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
        assert_eq!(findings.clone_matches, 0);
        assert_eq!(findings.noise_ratio, 1.0);
        assert!(!findings.diagnostics.is_empty());
    }

    #[test]
    fn test_triggered_signal_count() {
        let mut findings = ForensicFindings::neutral(50.0);
        assert_eq!(findings.triggered_signal_count(), 0);
        findings.indicator_tags.insert(IndicatorTag::Clone);
        findings.indicator_tags.insert(IndicatorTag::EdgeInconsistency);
        assert_eq!(findings.triggered_signal_count(), 2);
        findings.ela_interpretation.risk_boost = 6;
        assert_eq!(findings.triggered_signal_count(), 3);
    }
}
