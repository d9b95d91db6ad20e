//! Forensic probes. Each module is a pure function of a raster view plus
//! the calibration thresholds and returns a small result struct; the
//! engine folds them into one findings record.

pub mod clone;
pub mod color;
pub mod edges;
pub mod ela;
pub mod noise;
pub mod quantization;
pub mod resampling;
pub mod smoothing;

pub use ela::{ElaInterpretation, ElaLevel};
pub use quantization::QuantizationSignal;
