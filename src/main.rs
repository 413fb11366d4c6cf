use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use biff_config::commands;
use biff_config::config::{Args, Config};

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<bool> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // Parse configuration from command line and settings file
    let config = Config::from_args(args)?;
    if let Some(path) = &config.settings_path {
        log::debug!("using settings from {}", path.display());
    }

    let mut stdout = std::io::stdout().lock();
    commands::run(&config, &mut stdout)
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}
