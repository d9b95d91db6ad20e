// src/core/analysis/smoothing.rs
//
// Median-filter detection: apply a small median filter and compare against
// the original. An image that barely changes was in all likelihood already
// smoothed, which is how denoising hides other manipulations.

use image::GrayImage;

use crate::config::Thresholds;
use crate::core::dsp::filters::median_filter_3x3;
use crate::core::dsp::stats::mean_abs_diff;

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingAnalysis {
    pub is_median_filtered: bool,
    /// Mean absolute difference against the freshly filtered copy.
    pub mean_diff: f64,
}

pub fn detect(gray: &GrayImage, thresholds: &Thresholds) -> SmoothingAnalysis {
    let filtered = median_filter_3x3(gray);
    let mean_diff = mean_abs_diff(gray.as_raw(), filtered.as_raw());
    SmoothingAnalysis {
        is_median_filtered: mean_diff < thresholds.median_filter_mean_diff,
        mean_diff,
    }
}
