//! Tests for reading `.npy` volumes and assembling regions and diseases

#[cfg(test)]
mod tests {
    use lesionmap::io::volume::{
        DiseaseSpec, load_disease_set, load_region_volumes, read_mask, read_volume,
        regions_dir, volume_files,
    };
    use lesionmap::{AnalysisError, Region};
    use ndarray::{Array3, Array4};
    use ndarray_npy::{ReadNpyError, write_npy};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn labels() -> Array3<i32> {
        let mut labels = Array3::<i32>::zeros((3, 3, 3));
        labels[[1, 1, 1]] = 2;
        labels[[0, 0, 0]] = -1;
        labels
    }

    fn write_mask(dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        write_npy(&path, &Array3::<u8>::ones((3, 3, 3))).expect("Failed to write mask");
        path
    }

    // Tests integer and float dtypes are read as f64
    // Verified by only accepting f64 files
    #[test]
    fn test_read_volume_dtypes() {
        let dir = tempdir().expect("Failed to create temp dir");

        let int_path = dir.path().join("labels.npy");
        write_npy(&int_path, &labels()).expect("Failed to write labels");
        let volume = read_volume(&int_path).expect("Readable volume");
        assert_eq!(volume.dim(), (3, 3, 3));
        assert!((volume[[1, 1, 1]] - 2.0).abs() < f64::EPSILON);
        assert!((volume[[0, 0, 0]] + 1.0).abs() < f64::EPSILON);

        let float_path = dir.path().join("mask.npy");
        write_npy(&float_path, &Array3::<f32>::from_elem((2, 2, 2), 0.5))
            .expect("Failed to write mask");
        let mask = read_volume(&float_path).expect("Readable volume");
        assert!(mask.iter().all(|&v| (v - 0.5).abs() < f64::EPSILON));

        let wide_path = dir.path().join("wide.npy");
        write_npy(&wide_path, &Array3::<u64>::from_elem((2, 2, 2), 7))
            .expect("Failed to write wide labels");
        let wide = read_volume(&wide_path).expect("Readable volume");
        assert!(wide.iter().all(|&v| (v - 7.0).abs() < f64::EPSILON));

        let mut flags = Array3::from_elem((2, 2, 2), false);
        flags[[1, 0, 1]] = true;
        let bool_path = dir.path().join("flags.npy");
        write_npy(&bool_path, &flags).expect("Failed to write flags");
        let flag_volume = read_volume(&bool_path).expect("Readable volume");
        assert!((flag_volume[[1, 0, 1]] - 1.0).abs() < f64::EPSILON);
        assert!((flag_volume.sum() - 1.0).abs() < f64::EPSILON);
    }

    // Tests masks of any dtype become 0/1 bytes, including boolean masks
    // Verified by rejecting boolean mask files
    #[test]
    fn test_read_mask_dtypes() {
        let dir = tempdir().expect("Failed to create temp dir");

        let mut flags = Array3::from_elem((3, 3, 3), false);
        flags[[0, 1, 2]] = true;
        flags[[2, 2, 2]] = true;
        let bool_path = dir.path().join("small_bowel_quadrant.npy");
        write_npy(&bool_path, &flags).expect("Failed to write mask");
        let mask = read_mask(&bool_path).expect("Readable mask");
        assert_eq!(mask, flags.mapv(u8::from));

        let mut weights = Array3::<f32>::zeros((3, 3, 3));
        weights[[1, 1, 1]] = 0.25;
        weights[[0, 0, 0]] = -3.0;
        let float_path = dir.path().join("weights.npy");
        write_npy(&float_path, &weights).expect("Failed to write mask");
        let binary = read_mask(&float_path).expect("Readable mask");
        assert_eq!(binary[[1, 1, 1]], 1);
        assert_eq!(binary[[0, 0, 0]], 1);
        assert_eq!(binary.iter().map(|&v| usize::from(v)).sum::<usize>(), 2);

        let ints_path = dir.path().join("labels.npy");
        write_npy(&ints_path, &labels()).expect("Failed to write labels");
        let from_ints = read_mask(&ints_path).expect("Readable mask");
        assert!(from_ints.iter().all(|&v| v <= 1));
        assert_eq!(from_ints.iter().filter(|&&v| v == 1).count(), 2);
    }

    // Tests missing files and non-3D arrays are load errors
    // Verified by reshaping 2D arrays
    #[test]
    fn test_read_volume_errors() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(matches!(
            read_volume(&dir.path().join("absent.npy")),
            Err(AnalysisError::VolumeLoad { .. })
        ));

        let flat = dir.path().join("flat.npy");
        write_npy(&flat, &ndarray::Array2::<u8>::zeros((3, 3))).expect("Failed to write");
        assert!(matches!(read_volume(&flat), Err(AnalysisError::VolumeLoad { .. })));
        assert!(matches!(read_mask(&flat), Err(AnalysisError::VolumeLoad { .. })));
    }

    // Tests the dimension error of a matching dtype is reported, not a later dtype mismatch
    // Verified by reporting the error of the last reader tried
    #[test]
    fn test_read_volume_keeps_dimension_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let series = dir.path().join("series.npy");
        write_npy(&series, &Array4::<f64>::zeros((2, 2, 2, 2))).expect("Failed to write");

        assert!(matches!(
            read_volume(&series),
            Err(AnalysisError::VolumeLoad {
                source: ReadNpyError::WrongNdim(..),
                ..
            })
        ));
    }

    // Tests disease specs parse name, label and optional file
    // Verified by splitting the name at the first space
    #[test]
    fn test_disease_spec_parsing() {
        let shared: DiseaseSpec = "lymph node=2".parse().expect("Valid spec");
        assert_eq!(shared.name, "lymph node");
        assert!((shared.label - 2.0).abs() < f64::EPSILON);
        assert!(shared.volume.is_none());

        let own: DiseaseSpec = "primary=-1:/data/primary.npy".parse().expect("Valid spec");
        assert!((own.label + 1.0).abs() < f64::EPSILON);
        assert_eq!(own.volume, Some(PathBuf::from("/data/primary.npy")));

        assert!("primary".parse::<DiseaseSpec>().is_err());
        assert!("=2".parse::<DiseaseSpec>().is_err());
        assert!("primary=2.5".parse::<DiseaseSpec>().is_err());
    }

    // Tests only .npy files are listed, in path order
    // Verified by listing every file
    #[test]
    fn test_volume_files_filter() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_mask(dir.path(), "small_bowel_quadrant.npy");
        write_mask(dir.path(), "central_quadrant.npy");
        std::fs::write(dir.path().join("notes.txt"), "skip").expect("Failed to write");

        let files = volume_files(dir.path()).expect("Listable");
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["central_quadrant.npy", "small_bowel_quadrant.npy"]);
    }

    // Tests region masks resolve by file name
    // Verified by keying regions by file order
    #[test]
    fn test_load_region_volumes() {
        let case = tempdir().expect("Failed to create temp dir");
        let dir = regions_dir(case.path());
        std::fs::create_dir_all(&dir).expect("Failed to create dir");
        write_mask(&dir, "pelvic_region_quadrant.npy");
        write_mask(&dir, "left_upper_quadrant.npy");

        write_npy(
            dir.join("small_bowel_quadrant.npy"),
            &Array3::from_elem((3, 3, 3), true),
        )
        .expect("Failed to write mask");

        let regions = load_region_volumes(&dir).expect("Loadable regions");
        assert_eq!(
            regions.keys().copied().collect::<Vec<_>>(),
            vec![
                Region::LeftUpperQuadrant,
                Region::SmallBowel,
                Region::PelvicRegion
            ]
        );
        assert!(regions.values().all(|mask| mask.iter().all(|&v| v == 1)));
    }

    // Tests unknown names, duplicates and empty directories are rejected
    // Verified by skipping unknown files
    #[test]
    fn test_load_region_volumes_errors() {
        let empty = tempdir().expect("Failed to create temp dir");
        assert!(matches!(
            load_region_volumes(empty.path()),
            Err(AnalysisError::InvalidSourceData { .. })
        ));

        let unknown = tempdir().expect("Failed to create temp dir");
        write_mask(unknown.path(), "liver.npy");
        assert!(matches!(
            load_region_volumes(unknown.path()),
            Err(AnalysisError::UnknownRegion { .. })
        ));

        let duplicate = tempdir().expect("Failed to create temp dir");
        write_mask(duplicate.path(), "small_bowel_quadrant.npy");
        write_mask(duplicate.path(), "small_bowel_quadrant.v2.npy");
        assert!(matches!(
            load_region_volumes(duplicate.path()),
            Err(AnalysisError::InvalidSourceData { .. })
        ));
    }

    // Tests diseases share the label volume unless they name their own
    // Verified by copying the shared volume for every spec
    #[test]
    fn test_load_disease_set() {
        let dir = tempdir().expect("Failed to create temp dir");
        let shared = dir.path().join("labels.npy");
        write_npy(&shared, &labels()).expect("Failed to write labels");
        let own = write_mask(dir.path(), "primary.npy");

        let specs = vec![
            DiseaseSpec {
                name: "lymph node".to_string(),
                label: 2.0,
                volume: None,
            },
            DiseaseSpec {
                name: "primary".to_string(),
                label: 1.0,
                volume: Some(own),
            },
            DiseaseSpec {
                name: "carcinosis".to_string(),
                label: -1.0,
                volume: None,
            },
        ];

        let diseases = load_disease_set(Some(&shared), &specs).expect("Loadable diseases");
        let lymph = diseases.get("lymph node").expect("Loaded");
        assert!((lymph.volume[[1, 1, 1]] - 2.0).abs() < f64::EPSILON);
        let carcinosis = diseases.get("carcinosis").expect("Loaded");
        assert!(Arc::ptr_eq(&lymph.volume, &carcinosis.volume));
        assert_eq!(Arc::strong_count(&lymph.volume), 2);
        let primary = diseases.get("primary").expect("Loaded");
        assert!(primary.volume.iter().all(|&v| (v - 1.0).abs() < f64::EPSILON));
    }

    // Tests a spec without any volume and duplicate names are rejected
    // Verified by silently dropping such specs
    #[test]
    fn test_load_disease_set_errors() {
        let dir = tempdir().expect("Failed to create temp dir");
        let own = write_mask(dir.path(), "primary.npy");

        let orphan = vec![DiseaseSpec {
            name: "carcinosis".to_string(),
            label: 3.0,
            volume: None,
        }];
        assert!(matches!(
            load_disease_set(None, &orphan),
            Err(AnalysisError::InvalidParameter { parameter: "labels", .. })
        ));

        let spec = DiseaseSpec {
            name: "primary".to_string(),
            label: 1.0,
            volume: Some(own),
        };
        let duplicate = vec![spec.clone(), spec];
        assert!(matches!(
            load_disease_set(None, &duplicate),
            Err(AnalysisError::InvalidParameter { parameter: "disease", .. })
        ));
    }
}
