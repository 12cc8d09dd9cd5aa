//! Error types shared by the filtering core

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::classifier::DataType;

/// Result type for filtering operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while classifying, routing or aggregating input lines.
///
/// Input errors and unexpected parse failures are warnings: the pipeline
/// records them and keeps going. Output errors are fatal for the run.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A listed input file does not exist
    #[error("file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// I/O failure while opening or reading an input file
    #[error("error reading file {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory could not be created
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output file could not be opened
    #[error("cannot open output file {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing an output file failed
    #[error("failed to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value classified as numeric did not re-parse during aggregation
    #[error("failed to parse {data_type} value '{value}'")]
    UnexpectedParse { data_type: DataType, value: String },

    /// The configuration file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for the options
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `run` was called on a pipeline that already finished
    #[error("pipeline has already run")]
    AlreadyRan,
}

impl FilterError {
    /// Whether the run may continue after this error.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            FilterError::InputNotFound { .. }
                | FilterError::InputRead { .. }
                | FilterError::UnexpectedParse { .. }
        )
    }
}
