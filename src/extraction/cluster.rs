//! Geometric summaries of disease clusters and the extraction entry point

use crate::extraction::labeling::{Component, label_components};
use crate::extraction::mask::{VoxelIndex, VoxelMask};
use crate::io::error::Result;
use ndarray::ArrayView3;
use num_traits::{Num, Zero};
use serde::{Deserialize, Serialize};

/// One connected disease cluster inside a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// 1-based label from the labeling pass, not stable across recomputation
    pub cluster_id: u32,
    /// Mean member coordinate in fractional voxel units
    pub centroid: [f64; 3],
    /// Largest distance from a member voxel to the centroid
    pub radius: f64,
    /// Number of member voxels
    pub voxel_count: usize,
}

impl Cluster {
    /// Summarize a labeled component
    ///
    /// Returns `None` for an empty component.
    pub fn from_component(component: &Component) -> Option<Self> {
        if component.is_empty() {
            return None;
        }

        let count = component.len() as f64;
        let mut sums = [0.0_f64; 3];
        for voxel in &component.voxels {
            for (sum, &coordinate) in sums.iter_mut().zip(voxel) {
                *sum += coordinate as f64;
            }
        }
        let centroid = sums.map(|sum| sum / count);

        let radius = component
            .voxels
            .iter()
            .map(|voxel| distance(voxel, &centroid))
            .fold(0.0_f64, f64::max);

        Some(Self {
            cluster_id: component.label,
            centroid,
            radius,
            voxel_count: component.len(),
        })
    }

    /// Centroid truncated to integer voxel coordinates
    pub fn centroid_voxel(&self) -> VoxelIndex {
        self.centroid.map(|coordinate| coordinate.trunc() as usize)
    }
}

fn distance(voxel: &VoxelIndex, centroid: &[f64; 3]) -> f64 {
    voxel
        .iter()
        .zip(centroid)
        .map(|(&coordinate, &center)| {
            let delta = coordinate as f64 - center;
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}

/// Order clusters by radius, largest first
///
/// The sort is stable: clusters of equal radius keep their labeling order.
pub fn sort_by_radius(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| b.radius.total_cmp(&a.radius));
}

/// Extract the clusters of one disease inside one region
///
/// Voxels qualify when `disease * bool(region) == label`; qualifying voxels are grouped
/// under 26-connectivity and summarized. The result is sorted by radius, largest first,
/// and is empty when nothing qualifies.
///
/// `label` must be nonzero: with a zero label every voxel outside the region qualifies too.
///
/// # Errors
///
/// Returns [`crate::AnalysisError::ShapeMismatch`] if the volumes differ in shape
pub fn extract_clusters<T, R>(
    disease: ArrayView3<'_, T>,
    region: ArrayView3<'_, R>,
    label: T,
) -> Result<Vec<Cluster>>
where
    T: Num + Copy,
    R: Zero + PartialEq + Copy,
{
    let mask = VoxelMask::qualifying(&disease, &region, label)?;
    if mask.is_empty() {
        return Ok(Vec::new());
    }

    let mut clusters: Vec<Cluster> = label_components(&mask)
        .iter()
        .filter_map(Cluster::from_component)
        .collect();
    sort_by_radius(&mut clusters);

    Ok(clusters)
}
