//! Frame-timing statistics for a compositor.
//!
//! This crate holds the histogram engine and the two aggregation levels built
//! on top of it:
//! - [`Histogram`]: fixed-boundary latency buckets with clamping
//! - [`LayerStats`]: one surface's window, frame count and per-interval histograms
//! - [`GlobalStats`]: the session-wide counters and every tracked layer
//!
//! Each aggregate renders as diagnostic text through `Display` and as a wire
//! record through `to_proto`. The crate does no locking; callers that share a
//! [`GlobalStats`] between threads wrap it themselves.

pub mod error;
pub mod global;
pub mod histogram;
pub mod layer;
pub mod package;
pub mod proto;

pub use error::{Error, Result};
pub use global::GlobalStats;
pub use histogram::{Histogram, HISTOGRAM_BOUNDARIES};
pub use layer::{LayerStats, PRESENT_TO_PRESENT};
pub use package::derive_package_name;
pub use proto::{DeltaProto, GlobalStatsProto, HistogramBucketProto, LayerStatsProto};
