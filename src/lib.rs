//! Disease cluster extraction and caching over anatomical region masks
//!
//! Disease label volumes are intersected with region masks, the qualifying voxels are
//! grouped into 26-connected clusters, and the resulting catalog is stored so a viewer can
//! ask whether a disease is present in a region and where its largest cluster sits.

#![forbid(unsafe_code)]

/// Anatomical region identities
pub mod anatomy;
/// Cluster catalog computation, persistence and queries
pub mod catalog;
/// Connected cluster extraction from label and region volumes
pub mod extraction;
/// Input/output operations and error handling
pub mod io;

pub use anatomy::Region;
pub use catalog::{ClusterCache, ClusterCatalog};
pub use extraction::{Cluster, extract_clusters};
pub use io::error::{AnalysisError, Result};
