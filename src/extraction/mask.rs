use crate::io::error::{AnalysisError, Result};
use bitvec::prelude::*;
use ndarray::{ArrayView3, Zip};
use num_traits::{Num, Zero};
use std::fmt;

/// Voxel index in the volume's native axis order
pub type VoxelIndex = [usize; 3];

/// Dense boolean mask over a 3D voxel grid
///
/// Bits are stored in raster (C) order, so iterating set voxels visits them in the
/// same order a row-major scan of the volume would.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelMask {
    bits: BitVec,
    shape: [usize; 3],
}

impl VoxelMask {
    /// Create a mask with no voxels set
    pub fn new(shape: [usize; 3]) -> Self {
        let [depth, rows, cols] = shape;
        Self {
            bits: bitvec![0; depth * rows * cols],
            shape,
        }
    }

    /// Build the mask of voxels qualifying for one disease inside one region
    ///
    /// A voxel qualifies when `disease * bool(region) == label`. Out-of-region voxels are
    /// forced to zero before the comparison, so a zero `label` also selects every voxel
    /// outside the region. Callers are expected to pass a nonzero label.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ShapeMismatch`] if the two volumes differ in shape
    pub fn qualifying<T, R>(
        disease: &ArrayView3<'_, T>,
        region: &ArrayView3<'_, R>,
        label: T,
    ) -> Result<Self>
    where
        T: Num + Copy,
        R: Zero + PartialEq + Copy,
    {
        let disease_shape = shape_of(disease.dim());
        let region_shape = shape_of(region.dim());
        if disease_shape != region_shape {
            return Err(AnalysisError::ShapeMismatch {
                region: None,
                disease: None,
                disease_shape,
                region_shape,
            });
        }

        let mut mask = Self::new(disease_shape);
        Zip::indexed(disease)
            .and(region)
            .for_each(|(z, y, x), &value, &inside| {
                let membership = if inside.is_zero() { T::zero() } else { T::one() };
                if value * membership == label {
                    mask.insert([z, y, x]);
                }
            });

        Ok(mask)
    }

    /// Grid shape of the mask
    pub const fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Set a voxel, ignoring indices outside the grid
    pub fn insert(&mut self, index: VoxelIndex) {
        if let Some(offset) = self.offset(index) {
            self.bits.set(offset, true);
        }
    }

    /// Test voxel membership
    pub fn contains(&self, index: VoxelIndex) -> bool {
        self.offset(index)
            .is_some_and(|offset| self.bits.get(offset).as_deref() == Some(&true))
    }

    /// Test if no voxels are set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count set voxels
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate set voxels in raster order
    pub fn iter(&self) -> impl Iterator<Item = VoxelIndex> + '_ {
        self.bits.iter_ones().map(|offset| self.index_of(offset))
    }

    fn offset(&self, index: VoxelIndex) -> Option<usize> {
        let [z, y, x] = index;
        let [depth, rows, cols] = self.shape;
        (z < depth && y < rows && x < cols).then(|| (z * rows + y) * cols + x)
    }

    const fn index_of(&self, offset: usize) -> VoxelIndex {
        let [_, rows, cols] = self.shape;
        let plane = rows * cols;
        [offset / plane, (offset % plane) / cols, offset % cols]
    }
}

impl fmt::Display for VoxelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [depth, rows, cols] = self.shape;
        write!(
            f,
            "VoxelMask({} of {depth}x{rows}x{cols} voxels set)",
            self.count()
        )
    }
}

const fn shape_of(dim: (usize, usize, usize)) -> [usize; 3] {
    [dim.0, dim.1, dim.2]
}
