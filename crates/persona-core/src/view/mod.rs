//! Response shaping for graph records.
//!
//! Two output contracts exist for the same raw records: a verbose generic
//! shape that preserves every field, and a lossy optimized shape tailored
//! for direct frontend consumption. The optimized projection is one-way;
//! nothing maps it back.

pub mod generic;
pub mod optimized;

pub use generic::{EdgeProperties, GraphData, GraphEdge, GraphNode};
pub use optimized::{OptimizedGraphData, OptimizedGraphEdge, OptimizedPersonNode};
