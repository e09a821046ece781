use std::fmt;

use indexmap::IndexMap;

use crate::histogram::Histogram;
use crate::package::derive_package_name;
use crate::proto::{DeltaProto, HistogramBucketProto, LayerStatsProto};
use crate::Result;

/// Interval kind whose mean is reported as the layer's frame rate.
pub const PRESENT_TO_PRESENT: &str = "present2present";

/// Aggregated timing state for a single layer.
///
/// The collector owns the counters and window bounds and writes them
/// directly; histograms are created lazily by [`LayerStats::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStats {
    layer_name: String,
    pub stats_start: i64,
    pub stats_end: i64,
    pub total_frames: u32,
    deltas: IndexMap<String, Histogram>,
}

impl LayerStats {
    /// Start tracking a layer with an empty window and no histograms.
    pub fn new(layer_name: impl Into<String>) -> Self {
        Self {
            layer_name: layer_name.into(),
            ..Self::default()
        }
    }

    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    /// Package derived from the layer name, or an empty string.
    pub fn package_name(&self) -> String {
        derive_package_name(&self.layer_name)
    }

    /// Record a delta under `kind`, creating that histogram on first use.
    ///
    /// The histogram is created even when the delta itself is discarded.
    pub fn insert(&mut self, kind: &str, delta: i32) {
        if !self.deltas.contains_key(kind) {
            tracing::debug!(layer = %self.layer_name, kind, "tracking new interval kind");
            self.deltas.insert(kind.to_string(), Histogram::new());
        }
        if let Some(hist) = self.deltas.get_mut(kind) {
            hist.insert(delta);
        }
    }

    /// Histogram recorded for `kind`, if that kind was ever seen.
    pub fn histogram(&self, kind: &str) -> Option<&Histogram> {
        self.deltas.get(kind)
    }

    /// Interval kinds and their histograms, in first-seen order.
    pub fn deltas(&self) -> impl Iterator<Item = (&str, &Histogram)> + '_ {
        self.deltas.iter().map(|(kind, hist)| (kind.as_str(), hist))
    }

    /// Frames per second implied by the mean present-to-present interval.
    ///
    /// Returns `None` if no present-to-present interval was ever recorded.
    pub fn average_fps(&self) -> Option<Result<f64>> {
        self.deltas
            .get(PRESENT_TO_PRESENT)
            .map(|hist| hist.average_time().map(|avg| 1000.0 / avg))
    }

    /// Build the wire record; histograms list only observed buckets.
    pub fn to_proto(&self) -> LayerStatsProto {
        LayerStatsProto {
            layer_name: self.layer_name.clone(),
            package_name: self.package_name(),
            stats_start: self.stats_start,
            stats_end: self.stats_end,
            total_frames: self.total_frames,
            deltas: self
                .deltas
                .iter()
                .map(|(kind, hist)| DeltaProto {
                    delta_name: kind.clone(),
                    histograms: hist
                        .iter()
                        .map(|(render_millis, frame_count)| HistogramBucketProto {
                            render_millis,
                            frame_count,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for LayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "layerName = {}", self.layer_name)?;
        writeln!(f, "packageName = {}", self.package_name())?;
        writeln!(f, "statsStart = {}", self.stats_start)?;
        writeln!(f, "statsEnd = {}", self.stats_end)?;
        writeln!(f, "totalFrames= {}", self.total_frames)?;
        // An empty present2present histogram has no mean; skip the line.
        if let Some(Ok(fps)) = self.average_fps() {
            writeln!(f, "averageFPS = {:.3}", fps)?;
        }
        for (kind, hist) in &self.deltas {
            writeln!(f, "{} histogram is as below:", kind)?;
            write!(f, "{}", hist)?;
        }
        Ok(())
    }
}
