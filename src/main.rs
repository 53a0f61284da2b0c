// src/main.rs
use clap::Parser;
use ghrecon::constants::LOG_FILE_NAME;
use ghrecon::{commands, AppError, CommandLineInput, GitHubClient, ReconConfig};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::io;

/// Sets up logging configuration.
///
/// Console logs go to stderr so they never mix with report output.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn execute(config: &ReconConfig) -> Result<(), AppError> {
    let client = GitHubClient::new(config.settings.clone(), config.credential.clone())?;
    let stdout = io::stdout();
    let mut renderer = config.output.renderer(stdout.lock());

    match commands::run(config, &client, renderer.as_mut()) {
        Ok(()) => Ok(()),
        Err(error) => commands::report_failure(error, renderer.as_mut()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ReconConfig::resolve(cli)?;
    log::debug!("Resolved configuration: {:?}", config);

    execute(&config)?;

    Ok(())
}
