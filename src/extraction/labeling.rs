//! Connected component labeling of voxel masks under 26-connectivity
//!
//! Two voxels are connected when they share a face, an edge or a corner, i.e. every
//! voxel of the surrounding 3x3x3 block except the center. Components are numbered from 1
//! in raster order of their first voxel, matching a row-major scan of the volume.

use crate::extraction::mask::{VoxelIndex, VoxelMask};
use std::collections::VecDeque;

/// One connected group of mask voxels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// 1-based label assigned by the scan
    pub label: u32,
    /// Member voxels in raster order
    pub voxels: Vec<VoxelIndex>,
}

impl Component {
    /// Number of member voxels
    pub const fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Components produced by labeling are never empty
    pub const fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

/// Offsets of the 26 neighbors of a voxel
pub fn neighbor_offsets() -> impl Iterator<Item = [isize; 3]> {
    (-1..=1_isize)
        .flat_map(|dz| (-1..=1_isize).flat_map(move |dy| (-1..=1_isize).map(move |dx| [dz, dy, dx])))
        .filter(|offset| *offset != [0, 0, 0])
}

/// In-bounds neighbors of `index` within a grid of `shape`
pub fn neighbors(index: VoxelIndex, shape: [usize; 3]) -> impl Iterator<Item = VoxelIndex> {
    let [z, y, x] = index;
    let [depth, rows, cols] = shape;
    neighbor_offsets().filter_map(move |[dz, dy, dx]| {
        let nz = z.checked_add_signed(dz).filter(|&v| v < depth)?;
        let ny = y.checked_add_signed(dy).filter(|&v| v < rows)?;
        let nx = x.checked_add_signed(dx).filter(|&v| v < cols)?;
        Some([nz, ny, nx])
    })
}

/// Split a mask into its 26-connected components
///
/// Returns components ordered by label. An empty mask yields no components.
pub fn label_components(mask: &VoxelMask) -> Vec<Component> {
    let shape = mask.shape();
    let mut visited = VoxelMask::new(shape);
    let mut components = Vec::new();
    let mut frontier = VecDeque::new();

    for seed in mask.iter() {
        if visited.contains(seed) {
            continue;
        }

        visited.insert(seed);
        frontier.push_back(seed);
        let mut voxels = Vec::new();

        while let Some(voxel) = frontier.pop_front() {
            voxels.push(voxel);
            for neighbor in neighbors(voxel, shape) {
                if mask.contains(neighbor) && !visited.contains(neighbor) {
                    visited.insert(neighbor);
                    frontier.push_back(neighbor);
                }
            }
        }

        // Flood order differs from scan order; member order feeds the centroid sum
        voxels.sort_unstable();

        components.push(Component {
            label: components.len() as u32 + 1,
            voxels,
        });
    }

    components
}
