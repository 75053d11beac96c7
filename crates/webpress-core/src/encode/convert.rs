//! WebP encoding of a single decoded image (the per-item conversion step).
//!
//! Encoding is backed by libwebp through the `webp` crate, which covers both
//! the lossy (VP8) and lossless (VP8L) paths with an optional alpha plane.

use thiserror::Error;

use super::alpha::flatten_alpha;
use super::policy::EncodePolicy;
use crate::decode::{DecodedImage, PixelLayout};

/// Largest width or height a WebP bitstream can describe.
pub const MAX_WEBP_DIMENSION: u32 = 16383;

/// Compression effort used for lossless encodes. For VP8L the encoder's
/// quality knob trades speed for size and never affects pixel values.
pub const LOSSLESS_EFFORT: f32 = 75.0;

/// Errors that can occur while encoding a single image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The pixel buffer or dimensions are unusable, or libwebp rejected the input.
    #[error("WebP encoding failed: {0}")]
    EncodeFailure(String),
}

/// A WebP bitstream together with what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// WebP file bytes.
    pub bytes: Vec<u8>,
    /// Width in pixels (identical to the source).
    pub width: u32,
    /// Height in pixels (identical to the source).
    pub height: u32,
    /// Whether an alpha channel was written.
    pub has_alpha: bool,
    /// Whether the lossless path was used.
    pub lossless: bool,
}

/// Encode a decoded image to WebP according to `policy`.
///
/// * `lossless` selects VP8L and ignores quality.
/// * Otherwise the lossy encoder runs at `policy.effective_quality(..)`.
/// * With `preserve_alpha` off, RGBA sources are flattened over the policy
///   background and encoded as RGB.
///
/// Dimensions are never changed.
///
/// # Errors
///
/// Returns `ConvertError::EncodeFailure` when the buffer length does not match
/// the dimensions, a dimension is zero or above [`MAX_WEBP_DIMENSION`], or the
/// encoder reports an error.
pub fn encode_webp(image: &DecodedImage, policy: &EncodePolicy) -> Result<EncodedImage, ConvertError> {
    let (width, height) = (image.width, image.height);

    if width == 0 || height == 0 {
        return Err(ConvertError::EncodeFailure(format!(
            "invalid dimensions {width}x{height}"
        )));
    }
    if width > MAX_WEBP_DIMENSION || height > MAX_WEBP_DIMENSION {
        return Err(ConvertError::EncodeFailure(format!(
            "dimensions {width}x{height} exceed the WebP limit of {MAX_WEBP_DIMENSION}"
        )));
    }

    let expected = image.expected_len();
    if image.pixels.len() != expected {
        return Err(ConvertError::EncodeFailure(format!(
            "corrupted pixel buffer: expected {expected} bytes, got {}",
            image.pixels.len()
        )));
    }

    let keeps_alpha = image.has_alpha() && policy.preserve_alpha();

    let flattened;
    let (pixels, layout) = match image.layout {
        PixelLayout::Rgba if !keeps_alpha => {
            flattened = flatten_alpha(&image.pixels, policy.background());
            (flattened.as_slice(), webp::PixelLayout::Rgb)
        }
        PixelLayout::Rgba => (image.pixels.as_slice(), webp::PixelLayout::Rgba),
        PixelLayout::Rgb => (image.pixels.as_slice(), webp::PixelLayout::Rgb),
    };

    let encoder = webp::Encoder::new(pixels, layout, width, height);
    let memory = if policy.lossless() {
        // exact keeps the colour of fully transparent pixels
        let mut config = webp::WebPConfig::new().map_err(|_| {
            ConvertError::EncodeFailure("failed to initialise WebP config".to_string())
        })?;
        config.lossless = 1;
        config.exact = 1;
        config.quality = LOSSLESS_EFFORT;
        encoder.encode_advanced(&config)
    } else {
        encoder.encode_simple(false, policy.effective_quality(keeps_alpha) as f32)
    }
    .map_err(|e| ConvertError::EncodeFailure(format!("{e:?}")))?;

    Ok(EncodedImage {
        bytes: memory.to_vec(),
        width,
        height,
        has_alpha: keeps_alpha,
        lossless: policy.lossless(),
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
