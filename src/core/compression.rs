// src/core/compression.rs
//
// Compression profile matching: a fixed table of known distribution
// channels, each fingerprinted by an ELA-variance range and a typical
// dimension envelope. A match tells the scorer that benign recompression,
// not tampering, may explain low-grade pixel anomalies.

use serde::{Deserialize, Serialize};

/// Known distribution channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionProfileId {
    MessagingLow,
    SocialSquare,
    SocialWide,
    Microblog,
    CameraOriginal,
}

impl CompressionProfileId {
    /// Lossy re-encoding channels; a camera original is not one.
    pub fn is_lossy_channel(&self) -> bool {
        !matches!(self, CompressionProfileId::CameraOriginal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchConfidence {
    High,
    Medium,
}

/// One matched profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionProfileMatch {
    pub profile_id: CompressionProfileId,
    pub label: String,
    pub confidence: MatchConfidence,
    /// Whether the image dimensions fall inside the profile's typical
    /// envelope.
    pub size_match: bool,
}

struct ProfileSpec {
    id: CompressionProfileId,
    ela_range: (f64, f64),
    typical_size: (u32, u32),
    label: &'static str,
}

/// Fixed channel fingerprints. Ranges overlap on purpose: several channels
/// can plausibly explain the same signature.
const PROFILES: [ProfileSpec; 5] = [
    ProfileSpec {
        id: CompressionProfileId::MessagingLow,
        ela_range: (10.0, 50.0),
        typical_size: (1280, 1280),
        label: "messaging-app low-quality compression",
    },
    ProfileSpec {
        id: CompressionProfileId::SocialSquare,
        ela_range: (80.0, 180.0),
        typical_size: (1080, 1080),
        label: "square social-network compression",
    },
    ProfileSpec {
        id: CompressionProfileId::SocialWide,
        ela_range: (120.0, 280.0),
        typical_size: (2048, 2048),
        label: "wide social-network compression",
    },
    ProfileSpec {
        id: CompressionProfileId::Microblog,
        ela_range: (60.0, 160.0),
        typical_size: (1200, 675),
        label: "microblog compression",
    },
    ProfileSpec {
        id: CompressionProfileId::CameraOriginal,
        ela_range: (150.0, 450.0),
        typical_size: (4000, 3000),
        label: "original camera capture",
    },
];

/// Dimension tolerance around the typical envelope.
const SIZE_TOLERANCE: f64 = 0.5;

/// Capability trait for the profile lookup.
pub trait MatchProfiles {
    fn matches(&self, ela_variance: f64, width: u32, height: u32) -> Vec<CompressionProfileMatch>;
}

/// Default stateless matcher over the fixed profile table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressionProfileMatcher;

impl MatchProfiles for CompressionProfileMatcher {
    fn matches(&self, ela_variance: f64, width: u32, height: u32) -> Vec<CompressionProfileMatch> {
        let mut matches: Vec<(f64, CompressionProfileMatch)> = PROFILES
            .iter()
            .filter(|p| ela_variance >= p.ela_range.0 && ela_variance <= p.ela_range.1)
            .map(|p| {
                let (tw, th) = p.typical_size;
                let size_match = (width as f64 - tw as f64).abs() <= tw as f64 * SIZE_TOLERANCE
                    && (height as f64 - th as f64).abs() <= th as f64 * SIZE_TOLERANCE;
                let confidence = if size_match {
                    MatchConfidence::High
                } else {
                    MatchConfidence::Medium
                };
                (
                    p.ela_range.1 - p.ela_range.0,
                    CompressionProfileMatch {
                        profile_id: p.id,
                        label: p.label.to_string(),
                        confidence,
                        size_match,
                    },
                )
            })
            .collect();

        // most specific first: dimension-confirmed matches, then narrower
        // variance ranges
        matches.sort_by(|(wa, a), (wb, b)| {
            (a.confidence != MatchConfidence::High)
                .cmp(&(b.confidence != MatchConfidence::High))
                .then(wa.partial_cmp(wb).unwrap_or(std::cmp::Ordering::Equal))
        });

        matches.into_iter().map(|(_, m)| m).collect()
    }
}
