//! Fixed-boundary latency histogram.
//!
//! Buckets are 1ms wide up to 34ms, then widen to 2ms, 4ms and finally 50ms
//! in the tail. A delta lands in the smallest boundary that is not below it;
//! anything past the last boundary is counted there.

use std::collections::BTreeMap;
use std::fmt;

use crate::{Error, Result};

/// Number of buckets in every histogram.
pub const HISTOGRAM_SIZE: usize = 85;

/// Upper edges of the histogram buckets, in milliseconds, ascending.
pub const HISTOGRAM_BOUNDARIES: [i32; HISTOGRAM_SIZE] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, //
    17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, //
    34, 36, 38, 40, 42, 44, 46, 48, 50, 54, 58, 62, 66, 70, 74, 78, 82, //
    86, 90, 94, 98, 102, 106, 110, 114, 118, 122, 126, 130, 134, 138, 142, 146, 150, //
    200, 250, 300, 350, 400, 450, 500, 550, 600, 650, 700, 750, 800, 850, 900, 950, 1000,
];

const MAX_BOUNDARY: i32 = HISTOGRAM_BOUNDARIES[HISTOGRAM_SIZE - 1];

/// A bucketed frequency counter over [`HISTOGRAM_BOUNDARIES`].
///
/// Storage is sparse: a boundary that was never hit has no entry and reads
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    buckets: BTreeMap<i32, u32>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the bucket boundary a delta is counted under.
    ///
    /// Returns `None` for negative deltas, which are never recorded.
    pub fn bucket_for(delta: i32) -> Option<i32> {
        if delta < 0 {
            return None;
        }
        if delta > MAX_BOUNDARY {
            return Some(MAX_BOUNDARY);
        }
        let idx = HISTOGRAM_BOUNDARIES.partition_point(|&boundary| boundary < delta);
        Some(HISTOGRAM_BOUNDARIES[idx])
    }

    /// Record one observation of `delta` milliseconds.
    pub fn insert(&mut self, delta: i32) {
        match Self::bucket_for(delta) {
            Some(boundary) => {
                let count = self.buckets.entry(boundary).or_insert(0);
                *count = count.saturating_add(1);
            }
            None => tracing::trace!(delta, "discarding negative delta"),
        }
    }

    /// Count-weighted mean of the bucket boundaries, in milliseconds.
    pub fn average_time(&self) -> Result<f64> {
        let mut weighted: i64 = 0;
        let mut total: u64 = 0;
        for (&boundary, &count) in &self.buckets {
            weighted += i64::from(boundary) * i64::from(count);
            total += u64::from(count);
        }
        if total == 0 {
            return Err(Error::EmptyHistogram);
        }
        Ok(weighted as f64 / total as f64)
    }

    /// Observations counted under `boundary`.
    pub fn count(&self, boundary: i32) -> u32 {
        self.buckets.get(&boundary).copied().unwrap_or(0)
    }

    pub fn total_count(&self) -> u64 {
        self.buckets.values().map(|&count| u64::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Observed `(boundary, count)` pairs in ascending boundary order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.buckets.iter().map(|(&boundary, &count)| (boundary, count))
    }
}

impl fmt::Display for Histogram {
    /// Renders every boundary, including empty ones, as `<b>ms=<count>`
    /// separated by spaces and terminated by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &boundary) in HISTOGRAM_BOUNDARIES.iter().enumerate() {
            let sep = if i + 1 == HISTOGRAM_SIZE { '\n' } else { ' ' };
            write!(f, "{}ms={}{}", boundary, self.count(boundary), sep)?;
        }
        Ok(())
    }
}
