//! Wire records for dumped stats.
//!
//! Field names follow the external schema. Histograms are encoded sparsely:
//! only boundaries with at least one observation are listed.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One observed histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucketProto {
    /// Bucket boundary in milliseconds
    pub render_millis: i32,
    /// Observations counted under the boundary
    pub frame_count: u32,
}

/// The histogram recorded for one interval kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaProto {
    /// Interval kind, e.g. "present2present"
    pub delta_name: String,
    pub histograms: Vec<HistogramBucketProto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStatsProto {
    pub layer_name: String,
    /// Derived from `layer_name`; empty when no package could be recognized
    pub package_name: String,
    pub stats_start: i64,
    pub stats_end: i64,
    pub total_frames: u32,
    pub deltas: Vec<DeltaProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStatsProto {
    pub stats_start: i64,
    pub stats_end: i64,
    pub total_frames: u32,
    pub missed_frames: u32,
    pub client_composition_frames: u32,
    /// Per-layer records, in tracking order
    pub stats: Vec<LayerStatsProto>,
}

impl GlobalStatsProto {
    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
