// src/core/analysis/edges.rs
//
// Edge consistency: run an edge-extraction pass and an edge-enhancement
// pass and compare their mean outputs. Composited content shifts the
// balance between extracted edge energy and enhanced brightness.

use image::GrayImage;

use crate::config::Thresholds;
use crate::core::dsp::filters::{convolve_3x3, EDGE_ENHANCE_KERNEL, FIND_EDGES_KERNEL};
use crate::core::dsp::stats::mean_u8;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAnalysis {
    /// Absolute difference between the two mean filter outputs.
    pub mean_diff: f64,
    pub inconsistent: bool,
}

pub fn check(gray: &GrayImage, thresholds: &Thresholds) -> EdgeAnalysis {
    let extracted = convolve_3x3(gray, &FIND_EDGES_KERNEL);
    let enhanced = convolve_3x3(gray, &EDGE_ENHANCE_KERNEL);
    let mean_diff = (mean_u8(extracted.as_raw()) - mean_u8(enhanced.as_raw())).abs();
    EdgeAnalysis {
        mean_diff,
        inconsistent: mean_diff > thresholds.edge_consistency_diff,
    }
}
