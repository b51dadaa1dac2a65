//! Sequence length distribution

use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};
use crate::store::DocumentStore;

/// Bin width used by the dashboard's length histogram
pub const DEFAULT_BIN_WIDTH: usize = 200;

/// Residue count of a sequence; `None` for an empty one
pub fn sequence_length(sequence: &str) -> Option<usize> {
    match sequence.chars().count() {
        0 => None,
        n => Some(n),
    }
}

/// One length per document with a non-empty `Sequence`.
///
/// Documents without the field, or with an empty one, are left out rather
/// than counted as zero.
pub async fn sequence_length_distribution(store: &dyn DocumentStore) -> DashboardResult<Vec<usize>> {
    let sequences = store.sequences().await?;
    Ok(sequences.iter().filter_map(|s| sequence_length(s)).collect())
}

/// Half-open bin `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

/// Fixed-width histogram anchored at the shortest sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthHistogram {
    pub bin_width: usize,
    pub bins: Vec<HistogramBin>,
}

impl LengthHistogram {
    pub fn from_lengths(lengths: &[usize], bin_width: usize) -> DashboardResult<Self> {
        if bin_width == 0 {
            return Err(DashboardError::invalid_input("histogram bin width must be positive"));
        }

        let (min, max) = match (lengths.iter().min(), lengths.iter().max()) {
            (Some(min), Some(max)) => (*min, *max),
            _ => {
                return Ok(Self {
                    bin_width,
                    bins: Vec::new(),
                })
            }
        };

        let bin_count = (max - min) / bin_width + 1;
        let mut bins = (0..bin_count)
            .map(|i| -> DashboardResult<HistogramBin> {
                let start = i.checked_mul(bin_width).and_then(|offset| min.checked_add(offset));
                let end = start.and_then(|start| start.checked_add(bin_width));
                match (start, end) {
                    (Some(start), Some(end)) => Ok(HistogramBin { start, end, count: 0 }),
                    _ => Err(DashboardError::invalid_input(format!(
                        "histogram bin width {} is too large",
                        bin_width
                    ))),
                }
            })
            .collect::<DashboardResult<Vec<_>>>()?;

        for length in lengths {
            bins[(length - min) / bin_width].count += 1;
        }

        Ok(Self { bin_width, bins })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_length_counts_characters() {
        assert_eq!(sequence_length("MKVLAAGIVG"), Some(10));
        assert_eq!(sequence_length(""), None);
    }

    #[test]
    fn test_histogram_bins() {
        let histogram = LengthHistogram::from_lengths(&[100, 150, 299, 300, 510], 200).unwrap();

        assert_eq!(histogram.bins.len(), 3);
        assert_eq!(histogram.bins[0], HistogramBin { start: 100, end: 300, count: 3 });
        assert_eq!(histogram.bins[1], HistogramBin { start: 300, end: 500, count: 1 });
        assert_eq!(histogram.bins[2], HistogramBin { start: 500, end: 700, count: 1 });
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn test_histogram_single_length() {
        let histogram = LengthHistogram::from_lengths(&[42, 42], DEFAULT_BIN_WIDTH).unwrap();
        assert_eq!(histogram.bins, vec![HistogramBin { start: 42, end: 242, count: 2 }]);
    }

    #[test]
    fn test_histogram_empty_and_invalid() {
        assert!(LengthHistogram::from_lengths(&[], 10).unwrap().bins.is_empty());
        assert!(matches!(
            LengthHistogram::from_lengths(&[1, 2], 0),
            Err(DashboardError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_histogram_rejects_overflowing_width() {
        assert!(matches!(
            LengthHistogram::from_lengths(&[100, 150], usize::MAX),
            Err(DashboardError::InvalidInput(_))
        ));

        // Largest width whose single bin still fits
        let histogram = LengthHistogram::from_lengths(&[100, 150], usize::MAX - 100).unwrap();
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].end, usize::MAX);
        assert_eq!(histogram.total(), 2);
    }
}
