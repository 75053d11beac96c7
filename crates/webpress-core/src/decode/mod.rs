//! Image decoding for Webpress.
//!
//! This module provides functionality for:
//! - Validating the PNG byte signature of an upload
//! - Decoding PNG bytes into an 8-bit RGB or RGBA pixel buffer
//! - Reporting alpha-channel presence
//!
//! # Examples
//!
//! ```ignore
//! use webpress_core::decode::decode_png;
//!
//! let png_bytes = std::fs::read("icon.png").unwrap();
//! let image = decode_png(&png_bytes).unwrap();
//! println!("Decoded {}x{} image (alpha: {})", image.width, image.height, image.has_alpha());
//! ```

mod png;
mod types;

pub use png::{decode_png, is_png, PNG_SIGNATURE};
pub use types::{DecodeError, DecodedImage, PixelLayout};
