// src/core/analysis/resampling.rs
//
// Frequency-domain resampling detection. Uniform resizing imprints
// periodic interpolation artifacts that show up as isolated high-energy
// peaks away from the spectrum center; unmodified captures do not have
// them.

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::config::Thresholds;
use crate::core::dsp::stats::median_f64;
use crate::core::dsp::SpectrumBackend;

/// Longest side fed into the transform; larger inputs are downscaled first
/// to bound the cost of the most expensive probe.
const MAX_FFT_DIM: u32 = 512;

/// Radius of the DC block zeroed before peak statistics.
const DC_RADIUS: usize = 5;

/// Number of top-magnitude bins averaged for the peak estimate.
const TOP_BINS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct ResamplingAnalysis {
    pub is_resampled: bool,
    /// Mean of the strongest off-center bins over the spectrum median.
    pub peak_ratio: f64,
}

/// Look for periodic spectral peaks indicating prior resizing.
pub fn detect<B: SpectrumBackend>(
    gray: &GrayImage,
    thresholds: &Thresholds,
    backend: &B,
) -> ResamplingAnalysis {
    let (width, height) = gray.dimensions();
    let longest = width.max(height);

    let scaled;
    let input = if longest > MAX_FFT_DIM {
        let scale = MAX_FFT_DIM as f64 / longest as f64;
        let new_w = ((width as f64 * scale) as u32).max(1);
        let new_h = ((height as f64 * scale) as u32).max(1);
        scaled = imageops::resize(gray, new_w, new_h, FilterType::Lanczos3);
        &scaled
    } else {
        gray
    };

    let mut spectrum = backend.magnitude_centered(input);
    let (cx, cy) = spectrum.center();

    // suppress the low-frequency block around DC
    let w = spectrum.width;
    let h = spectrum.height;
    for y in cy.saturating_sub(DC_RADIUS)..(cy + DC_RADIUS + 1).min(h) {
        for x in cx.saturating_sub(DC_RADIUS)..(cx + DC_RADIUS + 1).min(w) {
            spectrum.magnitudes[y * w + x] = 0.0;
        }
    }

    let median = median_f64(&spectrum.magnitudes);
    if median <= 0.0 {
        // flat spectrum (e.g. constant image): nothing to compare against
        return ResamplingAnalysis {
            is_resampled: false,
            peak_ratio: 0.0,
        };
    }

    let top_mean = if spectrum.magnitudes.len() >= TOP_BINS {
        let mut sorted = spectrum.magnitudes.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted[sorted.len() - TOP_BINS..].iter().sum::<f64>() / TOP_BINS as f64
    } else {
        spectrum.magnitudes.iter().sum::<f64>() / spectrum.magnitudes.len() as f64
    };

    let peak_ratio = top_mean / (median + 1e-8);
    ResamplingAnalysis {
        is_resampled: peak_ratio > thresholds.resampling_peak_ratio,
        peak_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dsp::RustFftBackend;

    fn noise_image(width: u32, height: u32, seed: u32) -> GrayImage {
        let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
        let pixels: Vec<u8> = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 24) as u8
            })
            .collect();
        GrayImage::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_noise_is_not_flagged() {
        let img = noise_image(256, 256, 3);
        let result = detect(&img, &Thresholds::default(), &RustFftBackend);
        assert!(!result.is_resampled, "peak ratio was {}", result.peak_ratio);
    }

    #[test]
    fn test_periodic_pattern_is_flagged() {
        // strong sinusoid over a light noise floor: isolated spectral peaks
        let mut state = 99u32;
        let pixels: Vec<u8> = (0..256u32 * 256)
            .map(|i| {
                let x = i % 256;
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                let noise = ((state >> 24) % 5) as f64;
                let phase = 2.0 * std::f64::consts::PI * 12.0 * x as f64 / 256.0;
                (125.0 + 100.0 * phase.sin() + noise) as u8
            })
            .collect();
        let img = GrayImage::from_raw(256, 256, pixels).unwrap();

        let result = detect(&img, &Thresholds::default(), &RustFftBackend);
        assert!(result.is_resampled, "peak ratio was {}", result.peak_ratio);
    }

    #[test]
    fn test_constant_image_degrades() {
        let img = GrayImage::from_raw(128, 128, vec![200; 128 * 128]).unwrap();
        let result = detect(&img, &Thresholds::default(), &RustFftBackend);
        assert!(!result.is_resampled);
        assert_eq!(result.peak_ratio, 0.0);
    }
}
