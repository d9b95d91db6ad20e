//! ImageCheckr - Forensic corroboration engine for document images
//!
//! Ingests a decoded raster image and produces a quantitative, explainable
//! risk assessment of whether it is authentic, synthetic, or digitally
//! tampered, while avoiding false positives from ordinary social-media
//! recompression.
//!
//! ## Features
//!
//! - **Independent forensic probes**: error-level analysis, clone-stamp
//!   detection, frequency-domain resampling detection, median-filter
//!   detection, channel correlation, regional noise analysis, edge
//!   consistency, quantization-table inspection
//! - **Compression profile matching**: recognizes the signatures of known
//!   distribution channels (messaging apps, social networks, camera
//!   originals)
//! - **Normalized risk scoring**: weighted multi-domain aggregation with a
//!   benign-recompression reduction that never overrides real tamper
//!   evidence
//! - **Explicit calibration**: every empirical threshold lives in an
//!   immutable `Thresholds` value passed per call; no global state
//!
//! ## Module Structure
//!
//! - `core` - decoding, probes, profile matching, scoring, orchestration
//! - `config` - calibration thresholds
//! - `detection` - result vocabulary (issues, tags, risk score)
//! - `cli` - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use imagecheckr::core::{CorroborationAnalyzer, ExternalFindings};
//!
//! let analyzer = CorroborationAnalyzer::new();
//! let report = analyzer.analyze_bytes(&bytes, false, &ExternalFindings::default())?;
//!
//! println!("risk {:.0} ({:?})", report.risk.overall_score, report.risk.risk_level);
//! ```
//!
//! ## Risk levels
//!
//! | Score  | Level    | Default recommendation            |
//! |--------|----------|-----------------------------------|
//! | 0-40   | LOW      | Accept, standard processing       |
//! | 41-70  | MEDIUM   | Review flagged items              |
//! | 71-85  | HIGH     | Hold for manual review            |
//! | 86-100 | CRITICAL | Reject, escalate to investigation |

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Calibration configuration
pub mod config;

// Detection result types
pub mod detection;

// Library error types
pub mod error;

// Re-export commonly used types at crate root for convenience
pub use config::{ElaBands, Thresholds, ThresholdsBuilder};
pub use crate::core::{
    AiDetection, AnalyzerBuilder, CompressionProfileId, CompressionProfileMatch,
    CompressionProfileMatcher, CorroborationAnalyzer, CorroborationReport, Detect, ExternalFindings,
    ForensicFindings, ImageSample, MatchConfidence, MatchProfiles, RiskScorer, Score,
    StdImageDecoder, TamperingDetectionEngine,
};
pub use detection::{
    ContributingFactor, IndicatorTag, RiskLevel, RiskScore, Severity, ValidationIssue,
};
pub use error::EngineError;
