use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use crate::config::FilterOptions;
use crate::pipeline::Pipeline;
use crate::report;

#[derive(Parser, Debug, Clone)]
#[command(name = "typesift")]
#[command(version, about = "Split mixed text files into integers, floats and strings", long_about = None)]
pub struct Args {
    /// Input files, processed in order
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (default: current directory)
    #[arg(short, long, value_name = "PATH", env = "TYPESIFT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Prefix for output file names
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Append to existing output files instead of overwriting
    #[arg(short, long)]
    pub append: bool,

    /// Brief statistics (count only)
    #[arg(short = 's', long = "brief")]
    pub brief: bool,

    /// Full statistics (count, min, max, sum, average)
    #[arg(short = 'f', long = "full")]
    pub full: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Statistics output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (suppress warnings)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Args {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// Config file values, then command-line flags on top.
    pub fn to_options(&self) -> Result<FilterOptions> {
        let mut options = match &self.config {
            Some(path) => FilterOptions::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => FilterOptions::default(),
        };

        if let Some(output) = &self.output {
            options.output_dir = output.clone();
        }
        if let Some(prefix) = &self.prefix {
            options.prefix = prefix.clone();
        }
        options.append |= self.append;
        options.brief_statistics |= self.brief;
        options.full_statistics |= self.full;

        Ok(options)
    }
}

pub fn run(args: Args) -> Result<()> {
    let options = args.to_options()?;
    debug!("Options: {:?}", options);

    let mut pipeline = Pipeline::new(&options);
    let summary = pipeline
        .run_with_progress(args.inputs.as_slice(), |path| info!("Processing {}", path.display()))
        .context("Filtering failed")?;

    for output in &summary.outputs {
        info!("Wrote {}", output.display());
    }

    let mode = options.report_mode();
    match args.format {
        ReportFormat::Text => {
            if let Some(text) = report::render_text(&summary.statistics, mode) {
                print!("{}", text);
            }
        }
        ReportFormat::Json => {
            let json = report::render_json(&summary.statistics, mode);
            println!(
                "{}",
                serde_json::to_string_pretty(&json).context("Failed to serialize statistics")?
            );
        }
    }

    Ok(())
}
