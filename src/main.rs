use clap::Parser;
use colored::*;
use log::info;
use typesift::cli;

fn main() {
    let args = cli::Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .init();
    info!("Starting typesift v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(args) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
