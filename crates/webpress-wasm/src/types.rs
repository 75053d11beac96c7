//! WASM-compatible wrapper types for batch input and output.
//!
//! The UI collects uploads into a [`JsBatch`], hands it to `convert_batch`,
//! and reads results back from a [`JsConversionOutcome`].

use serde::Serialize;
use wasm_bindgen::prelude::*;
use webpress_core::package::archive_entries;
use webpress_core::report::{item_rows, summarize_items, ItemRow};
use webpress_core::{BatchStats, ConversionResponse, UploadedImage};

/// Uploads collected for one conversion request, in upload order.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsBatch {
    uploads: Vec<UploadedImage>,
}

#[wasm_bindgen]
impl JsBatch {
    /// Create an empty batch.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsBatch {
        JsBatch::default()
    }

    /// Append an uploaded file.
    ///
    /// # Arguments
    /// * `name` - Original file name (e.g. `photo.png`)
    /// * `bytes` - File contents as a `Uint8Array`
    pub fn add(&mut self, name: String, bytes: Vec<u8>) {
        self.uploads.push(UploadedImage::new(name, bytes));
    }

    /// Number of uploads in the batch
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.uploads.len()
    }

    /// Remove every upload.
    pub fn clear(&mut self) {
        self.uploads.clear();
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBatch {
    pub(crate) fn into_uploads(self) -> Vec<UploadedImage> {
        self.uploads
    }
}

/// Aggregate statistics as plain numbers for JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct JsStats {
    pub total_original_bytes: f64,
    pub total_converted_bytes: f64,
    pub success_count: usize,
    pub failure_count: usize,
    pub percent_reduction: Option<f64>,
}

impl From<&BatchStats> for JsStats {
    fn from(stats: &BatchStats) -> Self {
        Self {
            total_original_bytes: stats.total_original_bytes as f64,
            total_converted_bytes: stats.total_converted_bytes as f64,
            success_count: stats.success_count,
            failure_count: stats.failure_count,
            percent_reduction: stats.percent_reduction,
        }
    }
}

/// Result of a conversion request.
///
/// Holds every converted image in WASM memory until freed, so previews and
/// the download can be fetched on demand.
#[wasm_bindgen]
pub struct JsConversionOutcome {
    inner: ConversionResponse,
}

#[wasm_bindgen]
impl JsConversionOutcome {
    /// Number of uploads converted successfully
    #[wasm_bindgen(getter)]
    pub fn success_count(&self) -> usize {
        self.inner.report.stats.success_count
    }

    /// Number of uploads that failed
    #[wasm_bindgen(getter)]
    pub fn failure_count(&self) -> usize {
        self.inner.report.stats.failure_count
    }

    /// Total size of the successful sources in bytes
    #[wasm_bindgen(getter)]
    pub fn total_original_bytes(&self) -> f64 {
        self.inner.report.stats.total_original_bytes as f64
    }

    /// Total size of the WebP outputs in bytes
    #[wasm_bindgen(getter)]
    pub fn total_converted_bytes(&self) -> f64 {
        self.inner.report.stats.total_converted_bytes as f64
    }

    /// Percent reduction, or `undefined` when nothing was converted
    #[wasm_bindgen(getter)]
    pub fn percent_reduction(&self) -> Option<f64> {
        self.inner.report.stats.percent_reduction
    }

    /// Display text for the aggregate statistics
    #[wasm_bindgen(getter)]
    pub fn summary(&self) -> String {
        self.inner.summary.clone()
    }

    /// One display line per uploaded item, in upload order
    #[wasm_bindgen(getter)]
    pub fn item_summary(&self) -> String {
        summarize_items(&self.inner.report.results)
    }

    /// Whether there is a file to download
    #[wasm_bindgen(getter)]
    pub fn has_download(&self) -> bool {
        self.inner.download.is_ok()
    }

    /// Suggested file name for the download
    #[wasm_bindgen(getter)]
    pub fn download_name(&self) -> Option<String> {
        self.inner
            .download
            .as_ref()
            .ok()
            .map(|d| d.file_name().to_string())
    }

    /// MIME type of the download (`image/webp` or `application/zip`)
    #[wasm_bindgen(getter)]
    pub fn download_mime(&self) -> Option<String> {
        self.inner
            .download
            .as_ref()
            .ok()
            .map(|d| d.mime_type().to_string())
    }

    /// Download bytes as a `Uint8Array`.
    ///
    /// Note: This creates a copy of the data.
    pub fn download_bytes(&self) -> Option<Vec<u8>> {
        self.inner.download.as_ref().ok().map(|d| d.bytes().to_vec())
    }

    /// Why no download was produced, if so.
    #[wasm_bindgen(getter)]
    pub fn download_error(&self) -> Option<String> {
        self.inner.download.as_ref().err().map(|e| e.to_string())
    }

    /// WebP bytes of the item at `index` (upload order) for inline display.
    ///
    /// Returns `undefined` for failed items or out-of-range indices.
    pub fn preview(&self, index: usize) -> Option<Vec<u8>> {
        self.inner
            .report
            .results
            .get(index)
            .and_then(|r| r.converted())
            .map(|c| c.encoded_bytes.clone())
    }

    /// Archive entry names in download order.
    pub fn entry_names(&self) -> js_sys::Array {
        self.archive_names()
            .into_iter()
            .map(|name| JsValue::from_str(&name))
            .collect()
    }

    /// Per-item rows (`ItemRow` objects) in upload order.
    pub fn items(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.rows()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Aggregate statistics as a plain object.
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&JsStats::from(&self.inner.report.stats))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    /// Call this to release converted images once the download is done.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsConversionOutcome {
    pub(crate) fn from_response(inner: ConversionResponse) -> Self {
        Self { inner }
    }

    pub(crate) fn rows(&self) -> Vec<ItemRow> {
        item_rows(&self.inner.report.results)
    }

    pub(crate) fn archive_names(&self) -> Vec<String> {
        archive_entries(&self.inner.report.results)
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }
}
