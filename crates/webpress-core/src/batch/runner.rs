//! Sequential batch conversion.

use log::{debug, info, warn};

use super::stats::BatchStats;
use super::types::{ConversionResult, ConvertedImage, ItemError, UploadedImage};
use crate::decode::decode_png;
use crate::encode::{encode_webp, EncodePolicy};

/// Progress notification sent before an item starts converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress<'a> {
    /// Zero-based position of the item in the upload order.
    pub index: usize,
    /// Number of items in the batch.
    pub total: usize,
    /// Name of the upload about to be converted.
    pub name: &'a str,
}

impl BatchProgress<'_> {
    /// Fraction of the batch reached once this item finishes (0.0-1.0).
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.index + 1) as f32 / self.total as f32
    }
}

/// Ordered results plus the statistics derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// One entry per upload, in upload order.
    pub results: Vec<ConversionResult>,
    pub stats: BatchStats,
}

impl BatchReport {
    /// Build a report, deriving stats from `results`.
    pub fn from_results(results: Vec<ConversionResult>) -> Self {
        let stats = BatchStats::from_results(&results);
        Self { results, stats }
    }
}

type ProgressFn<'p> = Box<dyn FnMut(BatchProgress<'_>) + 'p>;

/// Converts uploads one at a time under a single policy.
///
/// A failing item is recorded and never stops the batch.
pub struct BatchRunner<'p> {
    policy: EncodePolicy,
    progress: Option<ProgressFn<'p>>,
}

impl<'p> BatchRunner<'p> {
    pub fn new(policy: EncodePolicy) -> Self {
        Self {
            policy,
            progress: None,
        }
    }

    /// Register a callback invoked before each item.
    pub fn with_progress(mut self, callback: impl FnMut(BatchProgress<'_>) + 'p) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn policy(&self) -> &EncodePolicy {
        &self.policy
    }

    /// Convert every upload in order and summarise the outcome.
    pub fn run(&mut self, uploads: Vec<UploadedImage>) -> BatchReport {
        let total = uploads.len();
        info!(
            "Converting {total} image(s) to WebP ({}, alpha {})",
            self.policy.compression_label(),
            if self.policy.preserve_alpha() { "kept" } else { "flattened" }
        );

        let mut results = Vec::with_capacity(total);
        for (index, upload) in uploads.into_iter().enumerate() {
            if let Some(progress) = self.progress.as_mut() {
                progress(BatchProgress {
                    index,
                    total,
                    name: &upload.name,
                });
            }
            results.push(convert_upload(&upload, &self.policy));
        }

        let report = BatchReport::from_results(results);
        info!(
            "Batch finished: {} converted, {} failed, {} -> {} bytes",
            report.stats.success_count,
            report.stats.failure_count,
            report.stats.total_original_bytes,
            report.stats.total_converted_bytes
        );
        report
    }
}

/// Convert a batch without progress reporting.
pub fn run_batch(uploads: Vec<UploadedImage>, policy: &EncodePolicy) -> BatchReport {
    BatchRunner::new(*policy).run(uploads)
}

/// Decode and encode a single upload, capturing any failure in the result.
pub fn convert_upload(upload: &UploadedImage, policy: &EncodePolicy) -> ConversionResult {
    match try_convert(upload, policy) {
        Ok(converted) => {
            debug!(
                "{}: {}x{} {} -> {} bytes",
                upload.name,
                converted.width,
                converted.height,
                converted.original_size,
                converted.converted_size
            );
            ConversionResult::success(upload.name.clone(), converted)
        }
        Err(reason) => {
            warn!("{}: conversion failed: {reason}", upload.name);
            ConversionResult::failure(upload.name.clone(), reason)
        }
    }
}

fn try_convert(upload: &UploadedImage, policy: &EncodePolicy) -> Result<ConvertedImage, ItemError> {
    let decoded = decode_png(&upload.raw_bytes)?;
    let has_transparency = decoded.has_transparency();
    let encoded = encode_webp(&decoded, policy)?;

    Ok(ConvertedImage {
        original_size: upload.size(),
        converted_size: encoded.bytes.len() as u64,
        width: encoded.width,
        height: encoded.height,
        has_transparency,
        alpha_retained: encoded.has_alpha,
        compression: policy.compression_label(),
        encoded_bytes: encoded.bytes,
    })
}
