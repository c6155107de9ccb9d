//! Fixed-width histogram bucketing, sliced by a secondary label
//!
//! Bucket semantics: `[bin, bin + width)`, except the first bucket also takes
//! values below the lower bound and the last bucket is `[bin, ∞)`. Every
//! sample therefore lands in exactly one bucket.

use crate::types::report::{BreakdownKind, Histogram, HistogramBin};
use crate::utils::math::{ceil_to_nearest, floor_to_nearest};
use std::collections::BTreeMap;

/// Bucket layout of a histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramSpec {
    pub lower: i64,
    pub upper: i64,
    pub width: i64,
}

impl HistogramSpec {
    pub fn new(lower: i64, upper: i64, width: i64) -> Self {
        Self {
            lower,
            upper,
            width: width.max(1),
        }
    }

    /// Layout spanning observed `[min, max]` rounded out to multiples of `step`
    ///
    /// A degenerate range (all samples on one multiple of `step`) is widened
    /// by one `step` so the layout always has at least one bucket.
    pub fn covering(min: i64, max: i64, step: i64, width: i64) -> Self {
        let lower = floor_to_nearest(min, step);
        let mut upper = ceil_to_nearest(max, step);
        if upper <= lower {
            upper = lower + step;
        }
        Self::new(lower, upper, width)
    }

    /// Lower edge of every bucket
    pub fn bins(&self) -> Vec<i64> {
        let mut bins = Vec::new();
        let mut edge = self.lower;
        while edge < self.upper {
            bins.push(edge);
            edge += self.width;
        }
        if bins.is_empty() {
            bins.push(self.lower);
        }
        bins
    }

    /// Bucket index for a sample value
    fn assign_bucket(&self, value: f64, bucket_count: usize) -> usize {
        if value < self.lower as f64 {
            return 0;
        }
        let index = ((value - self.lower as f64) / self.width as f64).floor() as usize;
        index.min(bucket_count - 1)
    }
}

/// Bucket `samples` (value, slice label) into a histogram
///
/// Every bucket carries a count for every label in `slices`, zero included.
pub fn build_histogram(spec: &HistogramSpec, samples: &[(f64, String)], slices: &[String]) -> Histogram {
    let bins = spec.bins();
    let mut counts: Vec<BTreeMap<String, usize>> = bins
        .iter()
        .map(|_| slices.iter().map(|label| (label.clone(), 0)).collect())
        .collect();

    for (value, slice) in samples {
        let index = spec.assign_bucket(*value, bins.len());
        *counts[index].entry(slice.clone()).or_insert(0) += 1;
    }

    Histogram {
        kind: BreakdownKind::Histogram,
        width: spec.width,
        data: bins
            .into_iter()
            .zip(counts)
            .map(|(bin, counts)| HistogramBin { bin, counts })
            .collect(),
    }
}
