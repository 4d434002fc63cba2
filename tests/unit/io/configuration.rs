//! Tests for configuration constants

#[cfg(test)]
mod tests {
    use lesionmap::io::configuration::{
        CATALOG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_RUNTIME_DIR_NAME, LOG_FILES_KEPT,
        LOG_ROTATION_BYTES, NEIGHBORHOOD_SIZE, REGIONS_DIR_NAME, VOLUME_EXTENSION,
    };

    // Tests on-disk names stay compatible with existing case directories
    // Verified by renaming the catalog blob
    #[test]
    fn test_file_names() {
        assert_eq!(CATALOG_FILE_NAME, "dict_clusters.bin");
        assert_eq!(DEFAULT_RUNTIME_DIR_NAME, "interface_runtime");
        assert_eq!(REGIONS_DIR_NAME, "regions");
        assert_eq!(VOLUME_EXTENSION, "npy");
    }

    // Tests connectivity and logging defaults
    // Verified by switching to face connectivity
    #[test]
    fn test_defaults() {
        assert_eq!(NEIGHBORHOOD_SIZE, 3 * 3 * 3 - 1);
        assert_eq!(DEFAULT_LOG_LEVEL, "info");
        assert!(LOG_ROTATION_BYTES > 0);
        assert!(LOG_FILES_KEPT > 0);
    }
}
