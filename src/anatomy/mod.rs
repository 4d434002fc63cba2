//! Anatomical region identities

/// Closed set of anatomical regions with ids, names and colors
pub mod region;

pub use region::Region;
