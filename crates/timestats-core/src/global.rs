use std::fmt;

use crate::layer::LayerStats;
use crate::proto::GlobalStatsProto;

/// Session-wide timing state and every layer tracked during the session.
///
/// One instance covers one measurement window. The collector holds it by
/// value, updates the counters directly and calls [`GlobalStats::reset`] to
/// start a new window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalStats {
    pub stats_start: i64,
    pub stats_end: i64,
    pub total_frames: u32,
    pub missed_frames: u32,
    pub client_composition_frames: u32,
    layers: Vec<LayerStats>,
}

impl GlobalStats {
    /// An empty session with a zeroed window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stats for `layer_name`, starting to track it if needed.
    ///
    /// Newly tracked layers are appended after every existing one.
    pub fn layer_mut(&mut self, layer_name: &str) -> &mut LayerStats {
        let idx = match self
            .layers
            .iter()
            .position(|layer| layer.layer_name() == layer_name)
        {
            Some(idx) => idx,
            None => {
                tracing::debug!(layer = layer_name, "tracking new layer");
                self.layers.push(LayerStats::new(layer_name));
                self.layers.len() - 1
            }
        };
        &mut self.layers[idx]
    }

    /// Stats for `layer_name`, if it is tracked.
    pub fn layer(&self, layer_name: &str) -> Option<&LayerStats> {
        self.layers
            .iter()
            .find(|layer| layer.layer_name() == layer_name)
    }

    /// Tracked layers, in the order they were first seen.
    pub fn layers(&self) -> &[LayerStats] {
        &self.layers
    }

    /// Drop every layer and zero the counters, opening a new window at `now`.
    pub fn reset(&mut self, now: i64) {
        tracing::debug!(dropped_layers = self.layers.len(), now, "resetting stats");
        *self = Self {
            stats_start: now,
            stats_end: now,
            ..Self::default()
        };
    }

    /// Build the wire record, one layer record per tracked layer in order.
    pub fn to_proto(&self) -> GlobalStatsProto {
        GlobalStatsProto {
            stats_start: self.stats_start,
            stats_end: self.stats_end,
            total_frames: self.total_frames,
            missed_frames: self.missed_frames,
            client_composition_frames: self.client_composition_frames,
            stats: self.layers.iter().map(LayerStats::to_proto).collect(),
        }
    }
}

impl fmt::Display for GlobalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SurfaceFlinger TimeStats:")?;
        writeln!(f, "statsStart = {}", self.stats_start)?;
        writeln!(f, "statsEnd = {}", self.stats_end)?;
        writeln!(f, "totalFrames= {}", self.total_frames)?;
        writeln!(f, "missedFrames= {}", self.missed_frames)?;
        writeln!(
            f,
            "clientCompositionFrames= {}",
            self.client_composition_frames
        )?;
        writeln!(f, "TimeStats for each layer is as below:")?;
        for layer in &self.layers {
            write!(f, "{}", layer)?;
        }
        Ok(())
    }
}
