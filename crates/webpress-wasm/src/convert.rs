//! Batch conversion WASM bindings.
//!
//! # Functions
//!
//! - [`convert_batch`] - Convert a batch using a policy object
//! - [`convert_batch_with`] - Convert a batch using individual settings
//! - [`default_policy`] - The policy the UI starts from
//!
//! # Example
//!
//! ```typescript
//! import { JsBatch, convert_batch } from '@webpress/wasm';
//!
//! const batch = new JsBatch();
//! for (const file of input.files) {
//!   batch.add(file.name, new Uint8Array(await file.arrayBuffer()));
//! }
//!
//! const outcome = convert_batch(batch, { quality: 85, lossless: false });
//! console.log(outcome.summary);
//! if (outcome.has_download) {
//!   const blob = new Blob([outcome.download_bytes()], { type: outcome.download_mime });
//! }
//! ```

use crate::types::{JsBatch, JsConversionOutcome};
use wasm_bindgen::prelude::*;
use webpress_core::{convert_request, ConversionRequest, EncodePolicy, PackageOptions};

/// Convert every upload in `batch` to WebP.
///
/// # Arguments
///
/// * `batch` - Uploads to convert (consumed)
/// * `policy` - `{ quality?, lossless?, preserve_alpha?, background? }`;
///   missing fields use the defaults, `undefined` uses the default policy
///
/// # Errors
///
/// Returns an error, before converting anything, if the policy is invalid
/// (e.g. quality outside 10-100). Per-image failures are not errors; they are
/// reported through the outcome.
#[wasm_bindgen]
pub fn convert_batch(batch: JsBatch, policy: JsValue) -> Result<JsConversionOutcome, JsValue> {
    let policy: EncodePolicy = if policy.is_undefined() || policy.is_null() {
        EncodePolicy::default()
    } else {
        serde_wasm_bindgen::from_value(policy)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?
    };

    Ok(run(batch, policy, PackageOptions::default()))
}

/// Convert every upload in `batch` using individual settings.
///
/// # Arguments
///
/// * `batch` - Uploads to convert (consumed)
/// * `quality` - Lossy quality (10-100)
/// * `lossless` - Encode without information loss (ignores quality)
/// * `preserve_alpha` - Keep transparency instead of flattening onto white
#[wasm_bindgen]
pub fn convert_batch_with(
    batch: JsBatch,
    quality: u32,
    lossless: bool,
    preserve_alpha: bool,
) -> Result<JsConversionOutcome, JsValue> {
    convert_settings(batch, quality, lossless, preserve_alpha).map_err(|e| JsValue::from_str(&e))
}

/// The default policy as a plain object.
#[wasm_bindgen]
pub fn default_policy() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&EncodePolicy::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn convert_settings(
    batch: JsBatch,
    quality: u32,
    lossless: bool,
    preserve_alpha: bool,
) -> Result<JsConversionOutcome, String> {
    let policy = EncodePolicy::new(quality, lossless, preserve_alpha)
        .map_err(|e| format!("Invalid settings: {}", e))?;
    Ok(run(batch, policy, PackageOptions::default()))
}

fn run(batch: JsBatch, policy: EncodePolicy, package: PackageOptions) -> JsConversionOutcome {
    let request =
        ConversionRequest::new(batch.into_uploads(), policy).with_package_options(package);
    JsConversionOutcome::from_response(convert_request(request))
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct TestPolicy {
        quality: u32,
    }

    #[wasm_bindgen_test]
    fn test_convert_batch_default_policy() {
        let batch = JsBatch::new();
        let outcome = convert_batch(batch, JsValue::UNDEFINED).unwrap();
        assert_eq!(outcome.success_count(), 0);
        assert!(!outcome.has_download());
    }

    #[wasm_bindgen_test]
    fn test_convert_batch_invalid_quality() {
        let policy = serde_wasm_bindgen::to_value(&TestPolicy { quality: 5 }).unwrap();
        let result = convert_batch(JsBatch::new(), policy);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_default_policy_object() {
        let policy = default_policy().unwrap();
        assert!(policy.is_object());
    }
}
