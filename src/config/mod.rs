// src/config/mod.rs
//
// Calibration configuration

mod thresholds;

pub use thresholds::{ElaBands, Thresholds, ThresholdsBuilder};
