//! Library error types

use thiserror::Error;

/// Errors surfaced by the corroboration engine.
///
/// Probe-level problems never appear here: individual probes degrade to
/// neutral findings with a diagnostic note instead of failing the analysis.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input bytes could not be decoded into a raster image.
    /// Raised before any probe runs; retrying is the caller's decision.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// A raster buffer was supplied whose length does not match its
    /// declared dimensions.
    #[error("invalid image sample: {0}")]
    InvalidSample(String),

    /// Scoring was requested with no validation domain present at all.
    /// A silent zero score would be indistinguishable from "verified
    /// clean", so this is an explicit failure.
    #[error("nothing to score: no image findings and no validation issues were supplied")]
    NothingToScore,
}
