//! Core analysis pipeline: decoding, forensic probes, profile matching,
//! scoring, and orchestration.

pub mod analysis;
pub mod analyzer;
pub mod compression;
pub mod decoder;
pub mod dsp;
pub mod engine;
pub mod scorer;

pub use analyzer::{
    AiDetection, AnalyzerBuilder, CorroborationAnalyzer, CorroborationReport, ExternalFindings,
};
pub use compression::{
    CompressionProfileId, CompressionProfileMatch, CompressionProfileMatcher, MatchConfidence,
    MatchProfiles,
};
pub use decoder::{decode_file, Decode, ImageSample, StdImageDecoder};
pub use engine::{Detect, ForensicFindings, TamperingDetectionEngine};
pub use scorer::{DomainWeights, RiskScorer, Score};
