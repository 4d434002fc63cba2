//! Tests for qualifying-voxel masks and bitset voxel storage

#[cfg(test)]
mod tests {
    use lesionmap::AnalysisError;
    use lesionmap::extraction::VoxelMask;
    use ndarray::Array3;

    // Tests insertion, membership and raster-order iteration
    // Verified by swapping row and column strides in the offset calculation
    #[test]
    fn test_insert_contains_and_iter_order() {
        let mut mask = VoxelMask::new([2, 3, 4]);
        mask.insert([1, 0, 0]);
        mask.insert([0, 2, 3]);
        mask.insert([0, 0, 1]);

        assert!(mask.contains([0, 2, 3]));
        assert!(!mask.contains([0, 3, 2]));
        assert_eq!(mask.count(), 3);
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![[0, 0, 1], [0, 2, 3], [1, 0, 0]]
        );
    }

    // Tests out-of-grid indices are ignored instead of wrapping into other voxels
    // Verified by removing the bounds check in the offset calculation
    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut mask = VoxelMask::new([2, 2, 2]);
        mask.insert([0, 0, 2]);
        mask.insert([5, 5, 5]);

        assert!(mask.is_empty());
        assert!(!mask.contains([0, 1, 0]));
        assert!(!mask.contains([2, 0, 0]));
    }

    // Tests only voxels carrying the label inside the region qualify
    // Verified by ignoring the region membership factor
    #[test]
    fn test_qualifying_intersects_label_and_region() {
        let mut disease = Array3::<i32>::zeros((1, 2, 3));
        disease[[0, 0, 0]] = 2;
        disease[[0, 0, 1]] = 2;
        disease[[0, 1, 2]] = 3;
        disease[[0, 1, 0]] = 2;

        let mut region = Array3::<u8>::zeros((1, 2, 3));
        region[[0, 0, 0]] = 1;
        region[[0, 0, 1]] = 255;
        region[[0, 1, 2]] = 1;

        let mask = VoxelMask::qualifying(&disease.view(), &region.view(), 2)
            .expect("Shapes match");

        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![[0, 0, 0], [0, 0, 1]]);
    }

    // Tests a zero label also selects every out-of-region voxel
    // Verified by skipping out-of-region voxels before comparison
    #[test]
    fn test_zero_label_matches_outside_region() {
        let disease = Array3::<f64>::from_elem((2, 2, 2), 4.0);
        let mut region = Array3::<f64>::zeros((2, 2, 2));
        region[[0, 0, 0]] = 1.0;

        let mask = VoxelMask::qualifying(&disease.view(), &region.view(), 0.0)
            .expect("Shapes match");

        assert_eq!(mask.count(), 7);
        assert!(!mask.contains([0, 0, 0]));
    }

    // Tests mismatched shapes are reported with both shapes
    // Verified by comparing only the first axis
    #[test]
    fn test_shape_mismatch() {
        let disease = Array3::<i32>::zeros((2, 3, 4));
        let region = Array3::<i32>::zeros((2, 4, 3));

        match VoxelMask::qualifying(&disease.view(), &region.view(), 1) {
            Err(AnalysisError::ShapeMismatch {
                disease_shape,
                region_shape,
                ..
            }) => {
                assert_eq!(disease_shape, [2, 3, 4]);
                assert_eq!(region_shape, [2, 4, 3]);
            }
            other => panic!("Expected ShapeMismatch, got {other:?}"),
        }
    }
}
