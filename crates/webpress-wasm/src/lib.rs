//! Webpress WASM - WebAssembly bindings for Webpress
//!
//! This crate exposes the webpress-core conversion pipeline to the browser UI.
//! It holds no conversion logic of its own.
//!
//! # Module Structure
//!
//! - `types` - Batch input and conversion outcome wrappers
//! - `convert` - Conversion entry points
//! - `logging` - `log` records forwarded to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsBatch, convert_batch_with } from '@webpress/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const batch = new JsBatch();
//! batch.add(file.name, new Uint8Array(await file.arrayBuffer()));
//! const outcome = convert_batch_with(batch, 85, false, true);
//! console.log(outcome.summary);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod logging;
mod types;

// Re-export public types
pub use convert::{convert_batch, convert_batch_with, default_policy};
pub use logging::{init_logging, set_log_level};
pub use types::{JsBatch, JsConversionOutcome};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    init_logging(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Accepted quality range as `[min, max, default]`
#[wasm_bindgen]
pub fn quality_range() -> Vec<u32> {
    use webpress_core::encode::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
    vec![MIN_QUALITY, MAX_QUALITY, DEFAULT_QUALITY]
}
