//! Webpress Core - PNG to WebP batch conversion
//!
//! This crate provides the conversion pipeline behind Webpress: decoding
//! uploaded PNGs, encoding them to WebP under a shared policy, collecting
//! per-item results and statistics, and packaging the outputs for download.
//!
//! Every function is a pure function of its inputs; there is no global state
//! and nothing outlives a single request.

pub mod batch;
pub mod decode;
pub mod encode;
pub mod package;
pub mod report;

#[cfg(test)]
mod test_support;

pub use batch::{
    run_batch, BatchProgress, BatchReport, BatchRunner, BatchStats, ConversionResult,
    ConvertedImage, ItemError, Outcome, UploadedImage,
};
pub use decode::{decode_png, DecodeError, DecodedImage};
pub use encode::{encode_webp, ConfigError, ConvertError, EncodePolicy};
pub use package::{bundle, pack, Download, PackageError, PackageOptions};
pub use report::{format_bytes, summarize};

use thiserror::Error;

/// Errors that end a request as a whole.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The policy was rejected before any item was processed.
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),

    /// The batch finished but produced nothing to download.
    #[error(transparent)]
    Package(#[from] PackageError),
}

/// Everything needed for one conversion request.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Uploads in the order the user supplied them.
    pub uploads: Vec<UploadedImage>,
    pub policy: EncodePolicy,
    pub package: PackageOptions,
}

impl ConversionRequest {
    pub fn new(uploads: Vec<UploadedImage>, policy: EncodePolicy) -> Self {
        Self {
            uploads,
            policy,
            package: PackageOptions::default(),
        }
    }

    /// Build a request from raw UI settings, validating them first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::QualityOutOfRange` for a quality outside 10-100.
    pub fn from_settings(
        uploads: Vec<UploadedImage>,
        quality: u32,
        lossless: bool,
        preserve_alpha: bool,
    ) -> Result<Self, ConfigError> {
        let policy = EncodePolicy::new(quality, lossless, preserve_alpha)?;
        Ok(Self::new(uploads, policy))
    }

    pub fn with_package_options(mut self, package: PackageOptions) -> Self {
        self.package = package;
        self
    }
}

/// Results of a finished request.
#[derive(Debug, Clone)]
pub struct ConversionResponse {
    /// Per-item results (in upload order) and aggregate statistics.
    pub report: BatchReport,
    /// The file to offer, or why there is none.
    pub download: Result<Download, PackageError>,
    /// Display text for the aggregate statistics.
    pub summary: String,
}

impl ConversionResponse {
    /// Take the download, turning an empty batch into a request error.
    pub fn into_download(self) -> Result<Download, RequestError> {
        Ok(self.download?)
    }
}

/// Run a full request: convert every upload, package and summarise.
///
/// Item failures stay inside `report`; an all-failed batch yields
/// `PackageError::EmptyBatch` in `download` while keeping the per-item
/// results available.
pub fn convert_request(request: ConversionRequest) -> ConversionResponse {
    convert_request_with_progress(request, |_| {})
}

/// Like [`convert_request`], reporting progress before each item.
pub fn convert_request_with_progress<'p>(
    request: ConversionRequest,
    progress: impl FnMut(BatchProgress<'_>) + 'p,
) -> ConversionResponse {
    let ConversionRequest {
        uploads,
        policy,
        package,
    } = request;

    let report = BatchRunner::new(policy).with_progress(progress).run(uploads);
    let download = bundle(&report.results, &package);
    if let Err(e) = &download {
        log::warn!("No download produced: {e}");
    }
    let summary = summarize(&report.stats);

    ConversionResponse {
        report,
        download,
        summary,
    }
}

/// Validate raw settings, then run the request.
///
/// # Errors
///
/// Returns `ConfigError` before touching any upload when the settings are
/// invalid.
pub fn convert_uploads(
    uploads: Vec<UploadedImage>,
    quality: u32,
    lossless: bool,
    preserve_alpha: bool,
) -> Result<ConversionResponse, ConfigError> {
    let request = ConversionRequest::from_settings(uploads, quality, lossless, preserve_alpha)?;
    Ok(convert_request(request))
}
