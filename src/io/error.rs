//! Error types and context management for cluster analysis operations

use crate::anatomy::Region;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all cluster analysis operations
#[derive(Debug)]
pub enum AnalysisError {
    /// Identifier, short name or file name matched no anatomical region
    UnknownRegion {
        /// The identifier that failed to resolve
        identifier: String,
    },

    /// Query for a region/disease pair that the catalog does not contain
    NotCataloged {
        /// Region that was queried
        region: Region,
        /// Disease that was queried
        disease: String,
    },

    /// Disease and region volumes do not share a voxel grid
    ShapeMismatch {
        /// Region being processed, when known
        region: Option<Region>,
        /// Disease being processed, when known
        disease: Option<String>,
        /// Shape of the disease label volume
        disease_shape: [usize; 3],
        /// Shape of the region mask volume
        region_shape: [usize; 3],
    },

    /// Failed to read a volume from an `.npy` file
    VolumeLoad {
        /// Path to the volume file
        path: PathBuf,
        /// Underlying reader error
        source: ndarray_npy::ReadNpyError,
    },

    /// A persisted catalog exists but cannot be decoded
    CatalogCorrupt {
        /// Path to the catalog blob
        path: PathBuf,
        /// Underlying decoding error
        source: bincode::Error,
    },

    /// The catalog could not be encoded for persistence
    CatalogEncode {
        /// Path where the catalog was to be written
        path: PathBuf,
        /// Underlying encoding error
        source: bincode::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Input data doesn't meet analysis requirements
    InvalidSourceData {
        /// Description of what's wrong with the input data
        reason: String,
    },

    /// Logger could not be configured or started
    Logging {
        /// Underlying logger error
        source: flexi_logger::FlexiLoggerError,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion { identifier } => {
                write!(f, "Unknown anatomical region: '{identifier}'")
            }
            Self::NotCataloged { region, disease } => {
                write!(
                    f,
                    "No catalog entry for disease '{disease}' in region '{}'",
                    region.short_name()
                )
            }
            Self::ShapeMismatch {
                region,
                disease,
                disease_shape,
                region_shape,
            } => {
                write!(
                    f,
                    "Volume shape mismatch: disease volume {disease_shape:?} vs region volume {region_shape:?}"
                )?;
                if let Some(disease) = disease {
                    write!(f, " (disease '{disease}')")?;
                }
                if let Some(region) = region {
                    write!(f, " (region '{}')", region.short_name())?;
                }
                Ok(())
            }
            Self::VolumeLoad { path, source } => {
                write!(f, "Failed to load volume '{}': {source}", path.display())
            }
            Self::CatalogCorrupt { path, source } => {
                write!(
                    f,
                    "Stored cluster catalog '{}' cannot be decoded: {source}",
                    path.display()
                )
            }
            Self::CatalogEncode { path, source } => {
                write!(
                    f,
                    "Failed to encode cluster catalog for '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::Logging { source } => {
                write!(f, "Failed to initialize logging: {source}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::VolumeLoad { source, .. } => Some(source),
            Self::CatalogCorrupt { source, .. } | Self::CatalogEncode { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            Self::Logging { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Region being processed
    pub region: Option<Region>,
    /// Disease being processed
    pub disease: Option<String>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

impl ErrorContext {
    /// Context for one region/disease pair
    pub fn pair(region: Region, disease: &str) -> Self {
        Self {
            region: Some(region),
            disease: Some(disease.to_string()),
            operation: None,
        }
    }
}

/// Enriches error messages with the pair being processed
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the operation context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation context applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AnalysisError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                AnalysisError::ShapeMismatch {
                    region, disease, ..
                } => {
                    if context.region.is_some() {
                        *region = context.region;
                    }
                    if context.disease.is_some() {
                        disease.clone_from(&context.disease);
                    }
                }
                AnalysisError::FileSystem { operation, .. } => {
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<flexi_logger::FlexiLoggerError> for AnalysisError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        Self::Logging { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> AnalysisError {
    AnalysisError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
