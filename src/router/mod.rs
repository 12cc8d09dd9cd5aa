//! Per-type output files
//!
//! The router hands out one [`OutputSink`] per [`DataType`], opening the
//! file the first time a line of that type shows up. Types that never
//! appear never touch the disk.

use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::classifier::DataType;
use crate::error::{FilterError, Result};

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate existing files
    #[default]
    Overwrite,
    /// Add lines after existing content
    Append,
}

/// An open, buffered output file.
#[derive(Debug)]
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
    lines_written: u64,
}

impl OutputSink {
    fn open(path: PathBuf, mode: WriteMode) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let file = match options.open(&path) {
            Ok(file) => file,
            Err(source) => return Err(FilterError::OutputOpen { path, source }),
        };
        debug!("Opened {} ({:?})", path.display(), mode);

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            lines_written: 0,
        })
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(LINE_SEPARATOR.as_bytes()))
            .map_err(|source| FilterError::OutputWrite {
                path: self.path.clone(),
                source,
            })?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| FilterError::OutputWrite {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

/// Maps each data type to its output file for the duration of a run.
///
/// Dropping the router drops its `BufWriter`s, which flush on the way
/// out, so buffered lines survive early returns. Use [`close_all`] to
/// see flush errors.
///
/// [`close_all`]: OutputRouter::close_all
#[derive(Debug)]
pub struct OutputRouter {
    output_dir: PathBuf,
    prefix: String,
    mode: WriteMode,
    sinks: HashMap<DataType, OutputSink>,
}

impl OutputRouter {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>, mode: WriteMode) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            mode,
            sinks: HashMap::new(),
        }
    }

    /// Where lines of `data_type` end up.
    pub fn destination(&self, data_type: DataType) -> PathBuf {
        destination_path(&self.output_dir, &self.prefix, data_type)
    }

    /// Returns the sink for `data_type`, creating the output directory and
    /// opening the file on first use.
    pub fn get_sink(&mut self, data_type: DataType) -> Result<&mut OutputSink> {
        match self.sinks.entry(data_type) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                fs::create_dir_all(&self.output_dir).map_err(|source| {
                    FilterError::OutputDirectory {
                        path: self.output_dir.clone(),
                        source,
                    }
                })?;
                let path = destination_path(&self.output_dir, &self.prefix, data_type);
                let sink = OutputSink::open(path, self.mode)?;
                Ok(entry.insert(sink))
            }
        }
    }

    pub fn write_line(&mut self, data_type: DataType, line: &str) -> Result<()> {
        self.get_sink(data_type)?.write_line(line)
    }

    pub fn is_open(&self, data_type: DataType) -> bool {
        self.sinks.contains_key(&data_type)
    }

    /// Flushes and closes every open sink.
    ///
    /// All sinks are closed even if one fails; the first failure is
    /// returned. On success, returns the written files in type order.
    pub fn close_all(&mut self) -> Result<Vec<PathBuf>> {
        let mut sinks: Vec<(DataType, OutputSink)> = self.sinks.drain().collect();
        sinks.sort_by_key(|(data_type, _)| *data_type);

        let mut first_error = None;
        let mut closed = Vec::with_capacity(sinks.len());
        for (_, mut sink) in sinks {
            match sink.flush() {
                Ok(()) => {
                    debug!("Closed {} after {} lines", sink.path.display(), sink.lines_written);
                    closed.push(sink.path);
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(closed),
        }
    }
}

fn destination_path(output_dir: &Path, prefix: &str, data_type: DataType) -> PathBuf {
    output_dir.join(data_type.output_file_name(prefix))
}
