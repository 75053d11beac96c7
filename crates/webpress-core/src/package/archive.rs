//! Zip packaging of converted images.

use std::io::{Cursor, Write};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::naming::EntryNamer;
use crate::batch::{ConversionResult, ConvertedImage};

/// Default download name for multi-file batches.
pub const DEFAULT_ARCHIVE_NAME: &str = "converted_webp.zip";

/// Errors raised while packaging a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// No item converted successfully, so there is nothing to download.
    #[error("No images were converted successfully; nothing to package")]
    EmptyBatch,

    /// The zip writer failed.
    #[error("Failed to build archive: {0}")]
    Archive(String),
}

impl From<zip::result::ZipError> for PackageError {
    fn from(e: zip::result::ZipError) -> Self {
        PackageError::Archive(e.to_string())
    }
}

impl From<std::io::Error> for PackageError {
    fn from(e: std::io::Error) -> Self {
        PackageError::Archive(e.to_string())
    }
}

/// How the download is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    /// File name offered for the archive download.
    pub archive_name: String,
    /// Deliver a lone successful image as a bare `.webp` instead of a zip.
    pub single_file_direct: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            single_file_direct: true,
        }
    }
}

/// A named archive entry borrowed from a result list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveEntry<'a> {
    /// Index of the originating result.
    pub index: usize,
    pub source_name: &'a str,
    pub image: &'a ConvertedImage,
}

/// Successful results paired with their unique entry names, in result order.
pub fn archive_entries(results: &[ConversionResult]) -> Vec<(String, ArchiveEntry<'_>)> {
    let mut namer = EntryNamer::new();

    results
        .iter()
        .enumerate()
        .filter_map(|(index, result)| {
            let image = result.converted()?;
            let name = namer.assign(&result.source_name);
            Some((
                name,
                ArchiveEntry {
                    index,
                    source_name: &result.source_name,
                    image,
                },
            ))
        })
        .collect()
}

/// Package every successful result into a zip archive.
///
/// Entries are stored uncompressed since WebP data is already compressed.
///
/// # Errors
///
/// Returns `PackageError::EmptyBatch` if no result is a success.
pub fn pack(results: &[ConversionResult]) -> Result<Vec<u8>, PackageError> {
    let entries = archive_entries(results);
    if entries.is_empty() {
        return Err(PackageError::EmptyBatch);
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, entry) in &entries {
        debug!("Adding {} as {name}", entry.source_name);
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&entry.image.encoded_bytes)?;
    }

    let buffer = zip.finish()?.into_inner();
    debug!("Archive holds {} entries, {} bytes", entries.len(), buffer.len());
    Ok(buffer)
}

/// A file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// A single converted image.
    Single { file_name: String, bytes: Vec<u8> },
    /// A zip archive of every converted image.
    Archive { file_name: String, bytes: Vec<u8> },
}

impl Download {
    pub fn file_name(&self) -> &str {
        match self {
            Download::Single { file_name, .. } | Download::Archive { file_name, .. } => file_name,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Download::Single { bytes, .. } | Download::Archive { bytes, .. } => bytes,
        }
    }

    /// MIME type to serve the download with.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Download::Single { .. } => "image/webp",
            Download::Archive { .. } => "application/zip",
        }
    }
}

/// Build the download for a finished batch.
///
/// # Errors
///
/// Returns `PackageError::EmptyBatch` if no result is a success.
pub fn bundle(results: &[ConversionResult], options: &PackageOptions) -> Result<Download, PackageError> {
    let mut entries = archive_entries(results);

    if options.single_file_direct && entries.len() == 1 {
        if let Some((file_name, entry)) = entries.pop() {
            return Ok(Download::Single {
                file_name,
                bytes: entry.image.encoded_bytes.clone(),
            });
        }
    }

    Ok(Download::Archive {
        file_name: options.archive_name.clone(),
        bytes: pack(results)?,
    })
}
