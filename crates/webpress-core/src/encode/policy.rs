//! Encode policy shared by every item of a batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted quality value.
pub const MIN_QUALITY: u32 = 10;
/// Highest accepted quality value.
pub const MAX_QUALITY: u32 = 100;
/// Quality used when none is supplied (matches the UI slider default).
pub const DEFAULT_QUALITY: u32 = 85;
/// Extra quality granted to lossy encodes that keep an alpha channel.
pub const ALPHA_QUALITY_BOOST: u32 = 5;
/// Background used when alpha is flattened away.
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Errors raised while building an [`EncodePolicy`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Quality lies outside `MIN_QUALITY..=MAX_QUALITY`.
    #[error("Quality {quality} is out of range (expected 10-100)")]
    QualityOutOfRange { quality: u32 },
}

/// How every image in a batch is encoded.
///
/// The value is validated on construction and immutable afterwards, so a
/// policy that exists is always a valid one. Deserialization goes through the
/// same validation and fills absent fields from [`EncodePolicy::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyFields")]
pub struct EncodePolicy {
    quality: u8,
    lossless: bool,
    preserve_alpha: bool,
    background: [u8; 3],
}

impl EncodePolicy {
    /// Create a policy, validating the quality range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::QualityOutOfRange` if `quality` is outside 10-100.
    /// The range is enforced even when `lossless` is set, since the slider
    /// value is still part of the request.
    pub fn new(quality: u32, lossless: bool, preserve_alpha: bool) -> Result<Self, ConfigError> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(ConfigError::QualityOutOfRange { quality });
        }

        Ok(Self {
            quality: quality as u8,
            lossless,
            preserve_alpha,
            background: DEFAULT_BACKGROUND,
        })
    }

    /// Replace the flattening background colour.
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Lossy quality (10-100).
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Whether encodes are lossless. Overrides `quality`.
    pub fn lossless(&self) -> bool {
        self.lossless
    }

    /// Whether an existing alpha channel is carried into the output.
    pub fn preserve_alpha(&self) -> bool {
        self.preserve_alpha
    }

    /// Background colour used when alpha is dropped.
    pub fn background(&self) -> [u8; 3] {
        self.background
    }

    /// Quality passed to the lossy encoder.
    ///
    /// Outputs that keep their alpha channel get a small boost, capped at 100.
    pub fn effective_quality(&self, keeps_alpha: bool) -> u8 {
        let quality = self.quality as u32;
        if keeps_alpha {
            (quality + ALPHA_QUALITY_BOOST).min(MAX_QUALITY) as u8
        } else {
            quality as u8
        }
    }

    /// Short human-readable description of the compression mode.
    pub fn compression_label(&self) -> String {
        if self.lossless {
            "Lossless".to_string()
        } else {
            format!("Quality {}", self.quality)
        }
    }
}

impl Default for EncodePolicy {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY as u8,
            lossless: false,
            preserve_alpha: true,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Unvalidated wire form of [`EncodePolicy`].
#[derive(Deserialize)]
#[serde(default)]
struct PolicyFields {
    quality: u32,
    lossless: bool,
    preserve_alpha: bool,
    background: [u8; 3],
}

impl Default for PolicyFields {
    fn default() -> Self {
        let policy = EncodePolicy::default();
        Self {
            quality: policy.quality as u32,
            lossless: policy.lossless,
            preserve_alpha: policy.preserve_alpha,
            background: policy.background,
        }
    }
}

impl TryFrom<PolicyFields> for EncodePolicy {
    type Error = ConfigError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        Ok(EncodePolicy::new(fields.quality, fields.lossless, fields.preserve_alpha)?
            .with_background(fields.background))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
