//! Archive entry names derived from upload names.

use std::collections::HashSet;

/// Extension given to every converted file.
pub const TARGET_EXTENSION: &str = "webp";

/// Stem used when an upload name has nothing usable left.
const FALLBACK_STEM: &str = "image";

/// Derive the WebP file name for an upload, without collision handling.
///
/// Directory components are stripped and the last extension is replaced:
/// `photos/cat.png` becomes `cat.webp`, `README` becomes `README.webp`.
pub fn target_name(source_name: &str) -> String {
    format!("{}.{TARGET_EXTENSION}", target_stem(source_name))
}

fn target_stem(source_name: &str) -> &str {
    let base = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name)
        .trim();

    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.trim().is_empty() => stem.trim(),
        _ => base,
    };

    if stem.is_empty() {
        FALLBACK_STEM
    } else {
        stem
    }
}

/// Hands out unique entry names for one archive.
///
/// The first upload deriving a name keeps it; later ones get `-2`, `-3`, ...
/// appended to the stem. Names are compared case-insensitively so the archive
/// also extracts cleanly on case-insensitive file systems.
#[derive(Debug, Default)]
pub struct EntryNamer {
    taken: HashSet<String>,
}

impl EntryNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return a unique name for `source_name`.
    pub fn assign(&mut self, source_name: &str) -> String {
        let stem = target_stem(source_name);
        let mut candidate = format!("{stem}.{TARGET_EXTENSION}");
        let mut counter = 2u32;

        while !self.taken.insert(candidate.to_lowercase()) {
            candidate = format!("{stem}-{counter}.{TARGET_EXTENSION}");
            counter += 1;
        }

        candidate
    }
}
