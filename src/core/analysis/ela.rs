// src/core/analysis/ela.rs
//
// Error Level Analysis: re-encode the sample as JPEG at a fixed moderate
// quality and measure the variance of the amplified difference map.
// Inconsistent compression history shows up as uneven error levels.

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::core::decoder::ImageSample;
use crate::core::dsp::stats::variance_u8;

/// Amplification applied to the difference map before statistics, matching
/// the brightness boost classically used to visualize ELA maps.
const ELA_GAIN: u16 = 20;

/// Images below this pixel count get relaxed lower bands, as do remote
/// fetches: small/web images naturally show low ELA variance.
const SMALL_IMAGE_PIXELS: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElaLevel {
    Normal,
    LowRisk,
    MediumRisk,
    HighRisk,
}

/// Contextual reading of the ELA variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaInterpretation {
    pub level: ElaLevel,
    pub message: String,
    /// Fixed score contribution for this band, 0-12.
    pub risk_boost: u8,
}

impl ElaInterpretation {
    fn normal() -> Self {
        Self {
            level: ElaLevel::Normal,
            message: "Normal compression pattern".to_string(),
            risk_boost: 0,
        }
    }
}

/// Outcome of the ELA pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ElaAnalysis {
    pub variance: f64,
    pub interpretation: ElaInterpretation,
    /// False when the re-encode pass could not run; variance is 0 and the
    /// interpretation is neutral in that case.
    pub performed: bool,
    pub note: Option<String>,
}

/// Run the ELA pass over a sample.
pub fn analyze(sample: &ImageSample, thresholds: &Thresholds) -> ElaAnalysis {
    let variance = match recompression_error_variance(sample, thresholds.ela_quality) {
        Ok(v) => v,
        Err(e) => {
            return ElaAnalysis {
                variance: 0.0,
                interpretation: ElaInterpretation::normal(),
                performed: false,
                note: Some(format!("ELA pass skipped: {e}")),
            }
        }
    };

    let interpretation = interpret(
        variance,
        sample.is_remote_origin,
        sample.pixel_count(),
        thresholds,
    );

    ElaAnalysis {
        variance,
        interpretation,
        performed: true,
        note: None,
    }
}

fn recompression_error_variance(sample: &ImageSample, quality: u8) -> Result<f64, image::ImageError> {
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality).write_image(
        &sample.pixels,
        sample.width,
        sample.height,
        image::ExtendedColorType::Rgb8,
    )?;
    let recompressed = image::load_from_memory(&encoded)?.to_rgb8();

    let error_map: Vec<u8> = sample
        .pixels
        .iter()
        .zip(recompressed.as_raw())
        .map(|(&a, &b)| {
            let diff = (a as i16 - b as i16).unsigned_abs();
            (diff * ELA_GAIN).min(255) as u8
        })
        .collect();

    Ok(variance_u8(&error_map))
}

/// Interpret an ELA variance in context.
///
/// Remote and sub-megapixel images relax the two lower bands slightly
/// (x0.9 / x0.95) before classification.
pub fn interpret(
    variance: f64,
    is_remote_origin: bool,
    pixel_count: u64,
    thresholds: &Thresholds,
) -> ElaInterpretation {
    let mut very_low = thresholds.ela.very_low;
    let mut low = thresholds.ela.low;
    if is_remote_origin || pixel_count < SMALL_IMAGE_PIXELS {
        very_low *= 0.9;
        low *= 0.95;
    }

    if variance < very_low {
        ElaInterpretation {
            level: ElaLevel::HighRisk,
            message: "Extremely low error level: possible synthetic or over-smoothed image"
                .to_string(),
            risk_boost: 12,
        }
    } else if variance < low {
        ElaInterpretation {
            level: ElaLevel::LowRisk,
            message: "Low error level: likely recompressed web image or slight processing"
                .to_string(),
            risk_boost: 1,
        }
    } else if variance > thresholds.ela.very_high {
        ElaInterpretation {
            level: ElaLevel::HighRisk,
            message: "Very high error level variance: strong manipulation signal".to_string(),
            risk_boost: 12,
        }
    } else if variance > thresholds.ela.high {
        ElaInterpretation {
            level: ElaLevel::MediumRisk,
            message: "High error level variance: inconsistent compression patterns".to_string(),
            risk_boost: 6,
        }
    } else {
        ElaInterpretation::normal()
    }
}
