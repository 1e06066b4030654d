mod cli;
mod core;

use clap::Parser;

use crate::core::error::SpeedrunError;

fn main() {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(err) = cli::execute(&cli) {
        eprintln!("{err}");
        let code = match err {
            SpeedrunError::ExternalTool {
                exit_code: Some(code),
            } => code,
            ref err if err.is_usage() => {
                eprintln!("{}", cli::USAGE_HINT);
                2
            }
            _ => 1,
        };
        std::process::exit(code);
    }
}
