// src/core/analysis/color.rs
//
// Channel-level checks: natural photographs keep their color channels
// highly correlated and roughly balanced. Low pairwise correlation points
// at channel manipulation; strongly skewed channel means point at
// inconsistent lighting or a synthetic color cast.

use crate::config::Thresholds;
use crate::core::decoder::ImageSample;
use crate::core::dsp::stats::pearson_correlation;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorAnalysis {
    /// Mean of the three pairwise channel correlations, [-1, 1].
    pub correlation: f64,
    pub low_correlation: bool,
    /// True when R/G or R/B mean ratios deviate beyond the calibrated
    /// tolerance.
    pub temperature_issue: bool,
}

pub fn analyze(sample: &ImageSample, thresholds: &Thresholds) -> ColorAnalysis {
    let n = sample.pixel_count() as usize;
    let mut r = Vec::with_capacity(n);
    let mut g = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);
    for px in sample.pixels.chunks_exact(3) {
        r.push(px[0] as f64);
        g.push(px[1] as f64);
        b.push(px[2] as f64);
    }

    let rg = pearson_correlation(&r, &g);
    let rb = pearson_correlation(&r, &b);
    let gb = pearson_correlation(&g, &b);
    let correlation = (rg + rb + gb) / 3.0;

    let mean = |c: &[f64]| c.iter().sum::<f64>() / c.len().max(1) as f64;
    let r_mean = mean(&r);
    let g_mean = mean(&g);
    let b_mean = mean(&b);
    let rg_ratio = r_mean / g_mean.max(1e-5);
    let rb_ratio = r_mean / b_mean.max(1e-5);
    let dev = thresholds.color_temperature_dev;
    let temperature_issue = (rg_ratio - 1.0).abs() > dev || (rb_ratio - 1.0).abs() > dev;

    ColorAnalysis {
        correlation,
        low_correlation: correlation < thresholds.color_correlation_low,
        temperature_issue,
    }
}
