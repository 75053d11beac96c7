//! Inputs and per-item results of a batch.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::ConvertError;

/// One uploaded file: its original name and raw bytes.
///
/// Owned by the runner for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// File name as supplied by the uploader (e.g. `photo.png`).
    pub name: String,
    /// Undecoded file contents.
    pub raw_bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(name: impl Into<String>, raw_bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            raw_bytes,
        }
    }

    /// Size of the upload in bytes.
    pub fn size(&self) -> u64 {
        self.raw_bytes.len() as u64
    }
}

/// Why a single item could not be converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A successfully converted image.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedImage {
    /// WebP file bytes, also usable as an inline preview.
    pub encoded_bytes: Vec<u8>,
    /// Size of the uploaded source file.
    pub original_size: u64,
    /// Size of `encoded_bytes`.
    pub converted_size: u64,
    pub width: u32,
    pub height: u32,
    /// Whether the source had any non-opaque pixel.
    pub has_transparency: bool,
    /// Whether the output carries an alpha channel.
    pub alpha_retained: bool,
    /// Compression mode description, e.g. `Quality 85` or `Lossless`.
    pub compression: String,
}

impl ConvertedImage {
    /// Percent size reduction of this item, `None` for an empty source.
    pub fn percent_reduction(&self) -> Option<f64> {
        percent_reduction(self.original_size, self.converted_size)
    }
}

/// Outcome of converting one upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(ConvertedImage),
    Failure { reason: ItemError },
}

/// Per-upload result, in the same position as its upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub source_name: String,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn success(source_name: impl Into<String>, converted: ConvertedImage) -> Self {
        Self {
            source_name: source_name.into(),
            outcome: Outcome::Success(converted),
        }
    }

    pub fn failure(source_name: impl Into<String>, reason: impl Into<ItemError>) -> Self {
        Self {
            source_name: source_name.into(),
            outcome: Outcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    /// The converted image, if this item succeeded.
    pub fn converted(&self) -> Option<&ConvertedImage> {
        match &self.outcome {
            Outcome::Success(converted) => Some(converted),
            Outcome::Failure { .. } => None,
        }
    }

    /// The failure reason, if this item failed.
    pub fn error(&self) -> Option<&ItemError> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure { reason } => Some(reason),
        }
    }
}

/// `(1 - converted / original) * 100`, undefined when `original` is zero.
pub fn percent_reduction(original: u64, converted: u64) -> Option<f64> {
    if original == 0 {
        return None;
    }
    Some((1.0 - converted as f64 / original as f64) * 100.0)
}
