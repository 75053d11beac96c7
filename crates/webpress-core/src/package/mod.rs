//! Download packaging for Webpress.
//!
//! Successful results are bundled into a zip archive whose entries are named
//! after the uploads with a `.webp` extension. Names that collide are made
//! unique with a numeric suffix.

mod archive;
mod naming;

pub use archive::{
    archive_entries, bundle, pack, ArchiveEntry, Download, PackageError, PackageOptions,
    DEFAULT_ARCHIVE_NAME,
};
pub use naming::{target_name, EntryNamer, TARGET_EXTENSION};
