// src/config/thresholds.rs
//
// Calibration thresholds for the forensic probes.
//
// Every probe reads its cutoffs from an immutable Thresholds value passed
// into the call, so concurrent analyses can run under different calibration
// profiles (e.g. per regulatory regime) without interfering. The defaults
// are a starting calibration; recalibrate against a labeled corpus before
// trusting them in production.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// ELA variance bands. Values between `low` and `high` are considered a
/// normal compression pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaBands {
    /// Below this: suspiciously flat error map (synthetic / over-smoothed).
    pub very_low: f64,
    /// Below this: typical recompressed web image.
    pub low: f64,
    /// Above this: inconsistent compression patterns.
    pub high: f64,
    /// Above this: strong multi-edit signal.
    pub very_high: f64,
}

impl Default for ElaBands {
    fn default() -> Self {
        Self {
            very_low: 15.0,
            low: 40.0,
            high: 600.0,
            very_high: 1000.0,
        }
    }
}

/// Complete calibration for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// ELA interpretation bands.
    pub ela: ElaBands,
    /// JPEG quality used for the ELA re-encode pass.
    pub ela_quality: u8,
    /// Max/min regional noise variance ratio above which noise is
    /// considered spatially inconsistent.
    pub noise_ratio_max: f64,
    /// Mean-output difference between the two edge passes above which edge
    /// structures are considered to disagree.
    pub edge_consistency_diff: f64,
    /// Off-center spectral peak to median magnitude ratio above which the
    /// image is flagged as resampled.
    pub resampling_peak_ratio: f64,
    /// Mean pairwise channel correlation below which color channels are
    /// considered anomalous.
    pub color_correlation_low: f64,
    /// Allowed deviation of R/G and R/B mean ratios from 1.0.
    pub color_temperature_dev: f64,
    /// Side length of the square blocks hashed by the clone scan.
    pub clone_block_size: u32,
    /// Minimum separation (in blocks) between two colliding blocks before
    /// the collision counts as a clone.
    pub clone_distance_min_blocks: u32,
    /// Mean absolute difference against a median-filtered copy below which
    /// the image is assumed to have been median-filtered already.
    pub median_filter_mean_diff: f64,
    /// Quantization table mean above which recompression is flagged.
    pub quantization_high_mean: f64,
    /// Quantization table variance below which tables count as uniform.
    pub quantization_uniform_variance: f64,
    /// Minimum table mean for the uniform-table signal to apply.
    pub quantization_uniform_mean: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ela: ElaBands::default(),
            ela_quality: 90,
            noise_ratio_max: 3.0,
            edge_consistency_diff: 20.0,
            resampling_peak_ratio: 8.0,
            color_correlation_low: 0.85,
            color_temperature_dev: 0.2,
            clone_block_size: 32,
            clone_distance_min_blocks: 2,
            median_filter_mean_diff: 1.0,
            quantization_high_mean: 40.0,
            quantization_uniform_variance: 20.0,
            quantization_uniform_mean: 20.0,
        }
    }
}

impl Thresholds {
    /// Load a calibration from a JSON file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let thresholds = serde_json::from_str(&text)?;
        Ok(thresholds)
    }

    pub fn builder() -> ThresholdsBuilder {
        ThresholdsBuilder::new()
    }
}

/// Fluent builder for custom calibrations.
pub struct ThresholdsBuilder {
    thresholds: Thresholds,
}

impl ThresholdsBuilder {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    pub fn ela_bands(mut self, bands: ElaBands) -> Self {
        self.thresholds.ela = bands;
        self
    }

    pub fn ela_quality(mut self, quality: u8) -> Self {
        self.thresholds.ela_quality = quality.clamp(1, 100);
        self
    }

    pub fn noise_ratio_max(mut self, ratio: f64) -> Self {
        self.thresholds.noise_ratio_max = ratio;
        self
    }

    pub fn edge_consistency_diff(mut self, diff: f64) -> Self {
        self.thresholds.edge_consistency_diff = diff;
        self
    }

    pub fn resampling_peak_ratio(mut self, ratio: f64) -> Self {
        self.thresholds.resampling_peak_ratio = ratio;
        self
    }

    pub fn color_correlation_low(mut self, corr: f64) -> Self {
        self.thresholds.color_correlation_low = corr.clamp(-1.0, 1.0);
        self
    }

    pub fn clone_block_size(mut self, size: u32) -> Self {
        self.thresholds.clone_block_size = size.max(8);
        self
    }

    pub fn clone_distance_min_blocks(mut self, blocks: u32) -> Self {
        self.thresholds.clone_distance_min_blocks = blocks;
        self
    }

    pub fn median_filter_mean_diff(mut self, diff: f64) -> Self {
        self.thresholds.median_filter_mean_diff = diff;
        self
    }

    pub fn build(self) -> Thresholds {
        self.thresholds
    }
}

impl Default for ThresholdsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
