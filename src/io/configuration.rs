//! Analysis constants and runtime configuration defaults

/// File name of the persisted cluster catalog inside the runtime directory
pub const CATALOG_FILE_NAME: &str = "dict_clusters.bin";

/// Subdirectory of a case directory holding the region mask volumes
pub const REGIONS_DIR_NAME: &str = "regions";

/// Subdirectory of a case directory used as the default catalog location
pub const DEFAULT_RUNTIME_DIR_NAME: &str = "interface_runtime";

/// Extension of volume files read from disk
pub const VOLUME_EXTENSION: &str = "npy";

// Fixed 3x3x3 neighborhood minus the center voxel
/// Number of neighbors a voxel is connected to
pub const NEIGHBORHOOD_SIZE: usize = 26;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Logging defaults
/// Log level specification used when none is given
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Rotate log files once they reach this many bytes
pub const LOG_ROTATION_BYTES: u64 = 1024 * 1024;
/// Number of rotated log files to keep
pub const LOG_FILES_KEPT: usize = 5;
