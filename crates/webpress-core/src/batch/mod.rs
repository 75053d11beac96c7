//! Batch conversion for Webpress.
//!
//! This module provides functionality for:
//! - Converting an ordered set of uploads under one [`EncodePolicy`](crate::encode::EncodePolicy)
//! - Recording a tagged success/failure result per upload, in upload order
//! - Deriving aggregate statistics from the results
//!
//! # Architecture
//!
//! Items are processed sequentially; each one is decoded and encoded
//! independently, so a failing item only affects its own result.

mod runner;
mod stats;
mod types;

pub use runner::{convert_upload, run_batch, BatchProgress, BatchReport, BatchRunner};
pub use stats::BatchStats;
pub use types::{
    percent_reduction, ConversionResult, ConvertedImage, ItemError, Outcome, UploadedImage,
};
