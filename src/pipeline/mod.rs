//! Single-pass line processing
//!
//! A [`Pipeline`] owns everything a run touches: the classifier, the
//! output router and the statistics. Each line is classified, written to
//! its type's file and counted before the next one is read.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::classifier::TypeClassifier;
use crate::config::FilterOptions;
use crate::error::{FilterError, Result};
use crate::router::OutputRouter;
use crate::stats::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Reading,
    Finalizing,
    Done,
    Error,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub statistics: Statistics,
    /// Lines routed to an output file
    pub lines_processed: u64,
    /// Output files written, in type order
    pub outputs: Vec<PathBuf>,
    /// Non-fatal problems, in the order they happened
    pub warnings: Vec<FilterError>,
}

pub struct Pipeline {
    classifier: TypeClassifier,
    router: OutputRouter,
    statistics: Statistics,
    state: PipelineState,
    lines_processed: u64,
    warnings: Vec<FilterError>,
}

impl Pipeline {
    pub fn new(options: &FilterOptions) -> Self {
        Self {
            classifier: TypeClassifier::new(),
            router: OutputRouter::new(&options.output_dir, &options.prefix, options.write_mode()),
            statistics: Statistics::new(),
            state: PipelineState::Init,
            lines_processed: 0,
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn run<P: AsRef<Path>>(&mut self, inputs: &[P]) -> Result<RunSummary> {
        self.run_with_progress(inputs, |_| {})
    }

    /// Processes every input in order, then closes all output files.
    ///
    /// `on_source` is called before each input is opened. Output files are
    /// closed even when processing stops on a fatal error.
    pub fn run_with_progress<P, F>(&mut self, inputs: &[P], mut on_source: F) -> Result<RunSummary>
    where
        P: AsRef<Path>,
        F: FnMut(&Path),
    {
        if self.state != PipelineState::Init {
            return Err(FilterError::AlreadyRan);
        }

        self.state = PipelineState::Reading;
        let read_result = inputs.iter().try_for_each(|input| {
            let path = input.as_ref();
            on_source(path);
            self.process_file(path)
        });

        self.state = PipelineState::Finalizing;
        let close_result = self.router.close_all();

        let outputs = match (read_result, close_result) {
            (Ok(()), Ok(outputs)) => outputs,
            (Err(e), close_result) => {
                if let Err(close_error) = close_result {
                    warn!("Closing outputs after a failed run: {}", close_error);
                    self.warnings.push(close_error);
                }
                self.state = PipelineState::Error;
                return Err(e);
            }
            (Ok(()), Err(e)) => {
                self.state = PipelineState::Error;
                return Err(e);
            }
        };

        self.state = PipelineState::Done;
        info!(
            "Processed {} lines into {} output files",
            self.lines_processed,
            outputs.len()
        );

        Ok(RunSummary {
            statistics: self.statistics.clone(),
            lines_processed: self.lines_processed,
            outputs,
            warnings: std::mem::take(&mut self.warnings),
        })
    }

    /// Reads one input file. Missing or unreadable files become warnings.
    pub fn process_file(&mut self, path: &Path) -> Result<()> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.warn(FilterError::InputNotFound {
                    path: path.to_path_buf(),
                });
                return Ok(());
            }
            Err(source) => {
                self.warn(FilterError::InputRead {
                    path: path.to_path_buf(),
                    source,
                });
                return Ok(());
            }
        };

        debug!("Reading {}", path.display());
        self.process_reader(path, BufReader::new(file))
    }

    /// Processes lines from any buffered source. A read error abandons the
    /// rest of this source; lines before it stay processed.
    pub fn process_reader<R: BufRead>(&mut self, name: &Path, reader: R) -> Result<()> {
        for line in reader.lines() {
            match line {
                Ok(line) => self.process_line(&line)?,
                Err(source) => {
                    self.warn(FilterError::InputRead {
                        path: name.to_path_buf(),
                        source,
                    });
                    break;
                }
            }
        }
        Ok(())
    }

    /// Classify, route, count. Only output errors are returned.
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        let classified = self.classifier.classify_line(line);
        self.router.write_line(classified.data_type, classified.text)?;
        self.lines_processed += 1;

        if let Err(e) = self.statistics.observe(&classified) {
            self.warn(e);
        }
        Ok(())
    }

    fn warn(&mut self, error: FilterError) {
        warn!("{}", error);
        self.warnings.push(error);
    }
}
