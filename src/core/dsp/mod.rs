//! Raster math shared by the forensic probes.

pub mod fft;
pub mod filters;
pub mod stats;

pub use fft::{RustFftBackend, Spectrum, SpectrumBackend};
