//! Aggregate statistics over a finished batch.

use serde::{Deserialize, Serialize};

use super::types::{percent_reduction, ConversionResult, Outcome};

/// Totals derived from the full result list.
///
/// Byte totals only count successful items; failures only show up in
/// `failure_count`. Always rebuilt from scratch via [`BatchStats::from_results`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_original_bytes: u64,
    pub total_converted_bytes: u64,
    pub success_count: usize,
    pub failure_count: usize,
    /// `None` when `total_original_bytes` is zero (reported as N/A).
    pub percent_reduction: Option<f64>,
}

impl BatchStats {
    /// Compute statistics from an ordered result list.
    pub fn from_results(results: &[ConversionResult]) -> Self {
        let mut stats = BatchStats::default();

        for result in results {
            match &result.outcome {
                Outcome::Success(converted) => {
                    stats.success_count += 1;
                    stats.total_original_bytes += converted.original_size;
                    stats.total_converted_bytes += converted.converted_size;
                }
                Outcome::Failure { .. } => stats.failure_count += 1,
            }
        }

        stats.percent_reduction =
            percent_reduction(stats.total_original_bytes, stats.total_converted_bytes);
        stats
    }

    /// Number of items the stats were computed over.
    pub fn item_count(&self) -> usize {
        self.success_count + self.failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::types::ConvertedImage;
    use crate::decode::DecodeError;

    fn ok(name: &str, original: u64, converted: u64) -> ConversionResult {
        ConversionResult::success(
            name,
            ConvertedImage {
                encoded_bytes: vec![0; converted as usize],
                original_size: original,
                converted_size: converted,
                width: 1,
                height: 1,
                has_transparency: false,
                alpha_retained: false,
                compression: "Quality 85".to_string(),
            },
        )
    }

    #[test]
    fn test_empty_batch() {
        let stats = BatchStats::from_results(&[]);
        assert_eq!(stats.item_count(), 0);
        assert_eq!(stats.percent_reduction, None);
    }

    #[test]
    fn test_failures_excluded_from_totals() {
        let results = vec![
            ok("a.png", 1000, 250),
            ConversionResult::failure("b.png", DecodeError::InvalidFormat),
            ok("c.png", 1000, 750),
        ];
        let stats = BatchStats::from_results(&results);

        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.total_original_bytes, 2000);
        assert_eq!(stats.total_converted_bytes, 1000);
        assert_eq!(stats.percent_reduction, Some(50.0));
    }

    #[test]
    fn test_all_failed_reduction_undefined() {
        let results = vec![ConversionResult::failure("x.png", DecodeError::InvalidFormat)];
        let stats = BatchStats::from_results(&results);
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.percent_reduction, None);
    }
}
