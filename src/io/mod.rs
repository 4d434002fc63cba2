//! Input/output operations, configuration and error handling

/// Command-line interface and case processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context
pub mod error;
/// Logger setup
pub mod logging;
/// Progress display for the extraction pass
pub mod progress;
/// Volume file loading
pub mod volume;
