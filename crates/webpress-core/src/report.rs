//! Human-readable batch summaries.
//!
//! Pure formatting over [`BatchStats`] and [`ConversionResult`]s; nothing in
//! here can fail.

use serde::{Deserialize, Serialize};

use crate::batch::{BatchStats, ConversionResult, Outcome};

/// Placeholder shown when a reduction is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a byte count with B/KB/MB/GB units (1024 steps, one decimal).
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} GB")
}

/// Format an optional percentage with one decimal, or `N/A`.
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) => format!("{value:.1}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Render aggregate statistics as display text.
pub fn summarize(stats: &BatchStats) -> String {
    format!(
        "Converted: {} | Failed: {}\nOriginal size: {}\nConverted size: {}\nReduction: {}",
        stats.success_count,
        stats.failure_count,
        format_bytes(stats.total_original_bytes),
        format_bytes(stats.total_converted_bytes),
        format_percent(stats.percent_reduction),
    )
}

/// One display row per upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    pub file: String,
    pub converted: bool,
    /// `WxH`, empty for failures.
    pub dimensions: String,
    pub original_size: String,
    pub converted_size: String,
    pub reduction: String,
    pub compression: String,
    pub transparency: bool,
    /// Failure reason, empty for successes.
    pub error: String,
}

/// Build display rows in result order.
pub fn item_rows(results: &[ConversionResult]) -> Vec<ItemRow> {
    results.iter().map(item_row).collect()
}

fn item_row(result: &ConversionResult) -> ItemRow {
    match &result.outcome {
        Outcome::Success(item) => ItemRow {
            file: result.source_name.clone(),
            converted: true,
            dimensions: format!("{}x{}", item.width, item.height),
            original_size: format_bytes(item.original_size),
            converted_size: format_bytes(item.converted_size),
            reduction: format_percent(item.percent_reduction()),
            compression: item.compression.clone(),
            transparency: item.has_transparency,
            error: String::new(),
        },
        Outcome::Failure { reason } => ItemRow {
            file: result.source_name.clone(),
            converted: false,
            dimensions: String::new(),
            original_size: String::new(),
            converted_size: String::new(),
            reduction: NOT_AVAILABLE.to_string(),
            compression: String::new(),
            transparency: false,
            error: reason.to_string(),
        },
    }
}

/// Render one line per upload.
pub fn summarize_items(results: &[ConversionResult]) -> String {
    item_rows(results)
        .iter()
        .map(|row| {
            if row.converted {
                let alpha = if row.transparency { ", transparent" } else { "" };
                format!(
                    "{}: {} -> {} ({}) {}, {}{alpha}",
                    row.file,
                    row.original_size,
                    row.converted_size,
                    row.reduction,
                    row.dimensions,
                    row.compression,
                )
            } else {
                format!("{}: FAILED ({})", row.file, row.error)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
