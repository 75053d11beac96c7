//! WebP encoding for Webpress.
//!
//! This module provides functionality for:
//! - Describing how a batch is encoded ([`EncodePolicy`])
//! - Encoding a decoded image to lossy or lossless WebP
//! - Flattening alpha over an opaque background when transparency is dropped
//!
//! All operations are synchronous and work on in-memory buffers only.
//!
//! # Examples
//!
//! ```ignore
//! use webpress_core::decode::decode_png;
//! use webpress_core::encode::{encode_webp, EncodePolicy};
//!
//! let image = decode_png(&png_bytes).unwrap();
//! let policy = EncodePolicy::new(85, false, true).unwrap();
//! let webp = encode_webp(&image, &policy).unwrap();
//! println!("Encoded {} bytes", webp.bytes.len());
//! ```

mod alpha;
mod policy;
mod convert;

pub use alpha::flatten_alpha;
pub use policy::{
    ConfigError, EncodePolicy, ALPHA_QUALITY_BOOST, DEFAULT_BACKGROUND, DEFAULT_QUALITY,
    MAX_QUALITY, MIN_QUALITY,
};
pub use convert::{encode_webp, ConvertError, EncodedImage, LOSSLESS_EFFORT, MAX_WEBP_DIMENSION};
