//! Logging initialization for the webstat binary.
//!
//! Stdout carries the report, so log lines go to stderr only. Nothing is
//! written to disk.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
};

pub fn initialize() {
    // A second call (tests, embedding) keeps the first logger.
    let _ = CombinedLogger::init(vec![stderr_logger(LevelFilter::Warn)]);
}

fn stderr_logger(level: LevelFilter) -> Box<dyn SharedLogger> {
    TermLogger::new(level, build_config(), TerminalMode::Stderr, ColorChoice::Auto)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
