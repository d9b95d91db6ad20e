// tests/test_utils/mod.rs
//
// Shared fixtures: deterministic synthetic rasters and findings builders.

#![allow(dead_code)]

use imagecheckr::core::ForensicFindings;
use imagecheckr::{ImageSample, IndicatorTag};

/// Deterministic LCG byte stream.
pub struct Lcg(pub u32);

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self(seed.wrapping_mul(2654435761).wrapping_add(1))
    }

    pub fn next_byte(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.0 >> 24) as u8
    }
}

/// Monochrome pseudo-noise sample (r = g = b, so the luma view is exact).
pub fn noise_sample(width: u32, height: u32, seed: u32) -> ImageSample {
    let mut rng = Lcg::new(seed);
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|_| {
            let v = rng.next_byte();
            [v, v, v]
        })
        .collect();
    ImageSample::from_rgb8(pixels, width, height, false, None, false).unwrap()
}

/// Copy a square block of the sample onto another position.
pub fn copy_block(sample: &mut ImageSample, from: (u32, u32), to: (u32, u32), size: u32) {
    let width = sample.width as usize;
    for dy in 0..size as usize {
        for dx in 0..size as usize {
            let src = ((from.1 as usize + dy) * width + from.0 as usize + dx) * 3;
            let dst = ((to.1 as usize + dy) * width + to.0 as usize + dx) * 3;
            for c in 0..3 {
                sample.pixels[dst + c] = sample.pixels[src + c];
            }
        }
    }
}

/// Neutral findings with a pinned ELA variance, plus the given tags.
pub fn findings_with_tags(ela_variance: f64, tags: &[IndicatorTag]) -> ForensicFindings {
    let mut findings = ForensicFindings::neutral(ela_variance);
    for &tag in tags {
        findings.indicator_tags.insert(tag);
        match tag {
            IndicatorTag::Clone => findings.clone_matches = 2,
            IndicatorTag::ResamplingDetected => findings.is_resampled = true,
            IndicatorTag::MedianFilterDetected => findings.is_median_filtered = true,
            IndicatorTag::ColorTemperature => findings.color_temperature_issue = true,
            IndicatorTag::NoiseInconsistency => findings.noise_ratio = 5.0,
            IndicatorTag::EdgeInconsistency => findings.edge_consistency_issue = true,
            IndicatorTag::LowColorCorrelation => findings.color_correlation = 0.5,
            _ => {}
        }
    }
    findings
}
