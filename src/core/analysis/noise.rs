// src/core/analysis/noise.rs
//
// Regional noise analysis: sensor noise is roughly uniform across an
// unmodified capture. Spliced composites mix sources with different noise
// floors, so the max/min ratio of per-region noise variance exposes them.

use image::imageops;
use image::GrayImage;

use crate::config::Thresholds;
use crate::core::dsp::filters::gaussian_blur;
use crate::core::dsp::stats::variance_u8;

/// Regions are capped at this side length.
const MAX_REGION: u32 = 100;

/// Sigma of the blur used as the noise-free reference.
const BLUR_SIGMA: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NoiseAnalysis {
    /// Max over min regional noise variance, >= 1.
    pub ratio: f64,
    pub inconsistent: bool,
    pub note: Option<String>,
}

pub fn analyze(gray: &GrayImage, thresholds: &Thresholds) -> NoiseAnalysis {
    let (width, height) = gray.dimensions();
    let region = MAX_REGION.min((width / 4).max(1)).min((height / 4).max(1));

    if width < region || height < region || region < 2 {
        return NoiseAnalysis {
            ratio: 1.0,
            inconsistent: false,
            note: Some("image too small for regional noise analysis".to_string()),
        };
    }

    let mut levels = Vec::new();
    let mut y = 0;
    while y + region <= height {
        let mut x = 0;
        while x + region <= width {
            levels.push(region_noise(gray, x, y, region));
            x += region;
        }
        y += region;
    }

    if levels.is_empty() {
        return NoiseAnalysis {
            ratio: 1.0,
            inconsistent: false,
            note: Some("no complete noise regions".to_string()),
        };
    }

    let max = levels.iter().cloned().fold(f64::MIN, f64::max);
    let min = levels.iter().cloned().fold(f64::MAX, f64::min).max(1e-5);
    let ratio = (max / min).max(1.0);

    NoiseAnalysis {
        ratio,
        inconsistent: ratio > thresholds.noise_ratio_max,
        note: None,
    }
}

/// Noise level of one region: variance of the residual after blurring.
fn region_noise(gray: &GrayImage, x: u32, y: u32, region: u32) -> f64 {
    let tile = imageops::crop_imm(gray, x, y, region, region).to_image();
    let blurred = gaussian_blur(&tile, BLUR_SIGMA);
    let residual: Vec<u8> = tile
        .as_raw()
        .iter()
        .zip(blurred.as_raw())
        .map(|(&a, &b)| (a as i16 - b as i16).unsigned_abs() as u8)
        .collect();
    variance_u8(&residual)
}
