//! Recorded capture files and their replay into [`GlobalStats`].

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use timestats_core::GlobalStats;

/// A recorded measurement session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capture {
    #[serde(default)]
    pub stats_start: i64,
    #[serde(default)]
    pub stats_end: i64,
    #[serde(default)]
    pub total_frames: u32,
    #[serde(default)]
    pub missed_frames: u32,
    #[serde(default)]
    pub client_composition_frames: u32,
    #[serde(default)]
    pub layers: Vec<LayerCapture>,
}

/// Raw timings recorded for one layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerCapture {
    pub layer_name: String,
    #[serde(default)]
    pub stats_start: i64,
    #[serde(default)]
    pub stats_end: i64,
    #[serde(default)]
    pub total_frames: u32,
    /// Raw millisecond deltas per interval kind, in file order
    #[serde(default)]
    pub deltas: IndexMap<String, Vec<i32>>,
}

impl Capture {
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read capture {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse capture {}", path.display()))
    }

    /// Feed every recorded counter and delta into `stats`.
    ///
    /// Layers are looked up by name, so a layer listed twice accumulates
    /// into one entry; its counters are taken from the last listing.
    pub fn replay(&self, stats: &mut GlobalStats) {
        if self.stats_start > self.stats_end {
            tracing::warn!(
                start = self.stats_start,
                end = self.stats_end,
                "capture window ends before it starts"
            );
        }
        stats.stats_start = self.stats_start;
        stats.stats_end = self.stats_end;
        stats.total_frames = self.total_frames;
        stats.missed_frames = self.missed_frames;
        stats.client_composition_frames = self.client_composition_frames;

        for recorded in &self.layers {
            let layer = stats.layer_mut(&recorded.layer_name);
            layer.stats_start = recorded.stats_start;
            layer.stats_end = recorded.stats_end;
            layer.total_frames = recorded.total_frames;
            for (kind, deltas) in &recorded.deltas {
                for &delta in deltas {
                    layer.insert(kind, delta);
                }
            }
        }
        tracing::info!(layers = stats.layers().len(), "replayed capture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timestats_core::PRESENT_TO_PRESENT;

    const CAPTURE: &str = r#"{
        "stats_start": 100,
        "stats_end": 900,
        "total_frames": 3,
        "missed_frames": 1,
        "layers": [
            {
                "layer_name": "com.example.app/MainActivity#0",
                "stats_start": 100,
                "stats_end": 900,
                "total_frames": 3,
                "deltas": {
                    "post2present": [4, -1],
                    "present2present": [16, 16, 33]
                }
            }
        ]
    }"#;

    #[test]
    fn test_missing_counters_default_to_zero() {
        let capture: Capture = serde_json::from_str(CAPTURE).unwrap();
        assert_eq!(capture.client_composition_frames, 0);
        assert_eq!(capture.layers.len(), 1);
    }

    #[test]
    fn test_replay_populates_stats() {
        let capture: Capture = serde_json::from_str(CAPTURE).unwrap();
        let mut stats = GlobalStats::new();
        capture.replay(&mut stats);

        assert_eq!(stats.total_frames, 3);
        assert_eq!(stats.missed_frames, 1);
        let layer = stats.layer("com.example.app/MainActivity#0").unwrap();
        assert_eq!(layer.total_frames, 3);
        assert_eq!(layer.histogram(PRESENT_TO_PRESENT).unwrap().total_count(), 3);
        assert_eq!(layer.histogram("post2present").unwrap().total_count(), 1);

        let kinds: Vec<&str> = layer.deltas().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec!["post2present", PRESENT_TO_PRESENT]);
    }

    #[test]
    fn test_repeated_layer_accumulates() {
        let capture = Capture {
            layers: vec![
                LayerCapture {
                    layer_name: "StatusBar#0".to_string(),
                    deltas: IndexMap::from([("present2present".to_string(), vec![16])]),
                    ..LayerCapture::default()
                },
                LayerCapture {
                    layer_name: "StatusBar#0".to_string(),
                    total_frames: 2,
                    deltas: IndexMap::from([("present2present".to_string(), vec![17])]),
                    ..LayerCapture::default()
                },
            ],
            ..Capture::default()
        };
        let mut stats = GlobalStats::new();
        capture.replay(&mut stats);

        assert_eq!(stats.layers().len(), 1);
        let layer = &stats.layers()[0];
        assert_eq!(layer.total_frames, 2);
        assert_eq!(layer.histogram(PRESENT_TO_PRESENT).unwrap().total_count(), 2);
    }
}
