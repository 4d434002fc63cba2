//! Disease cluster extraction over region masks

/// Cluster summaries and the extraction entry point
pub mod cluster;
/// 26-connected component labeling
pub mod labeling;
/// Qualifying-voxel masks backed by a bitset
pub mod mask;

pub use cluster::{Cluster, extract_clusters};
pub use mask::{VoxelIndex, VoxelMask};
