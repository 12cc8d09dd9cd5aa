//! Run options
//!
//! Options come from an optional TOML file and are then overridden by
//! command-line flags. Every key is optional:
//!
//! ```toml
//! output_dir = "out"
//! prefix = "batch_"
//! append = true
//! full_statistics = true
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FilterError, Result};
use crate::router::WriteMode;

/// How much of the statistics to report at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    None,
    /// Counts only
    Brief,
    /// Counts plus min, max, sum and average
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub append: bool,
    pub brief_statistics: bool,
    pub full_statistics: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: String::new(),
            append: false,
            brief_statistics: false,
            full_statistics: false,
        }
    }
}

impl FilterOptions {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| FilterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| FilterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.append {
            WriteMode::Append
        } else {
            WriteMode::Overwrite
        }
    }

    /// Full wins when both levels are requested.
    pub fn report_mode(&self) -> ReportMode {
        if self.full_statistics {
            ReportMode::Full
        } else if self.brief_statistics {
            ReportMode::Brief
        } else {
            ReportMode::None
        }
    }
}
