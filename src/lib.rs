//! Sorts the lines of text files into integer, float and string outputs
//! and keeps running statistics per type.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod router;
pub mod stats;

pub use classifier::{ClassifiedLine, DataType, TypeClassifier};
pub use config::{FilterOptions, ReportMode};
pub use error::{FilterError, Result};
pub use pipeline::{Pipeline, PipelineState, RunSummary};
pub use router::{OutputRouter, OutputSink, WriteMode};
pub use stats::{Statistics, StatsRecord};
