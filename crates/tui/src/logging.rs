use std::fs::OpenOptions;

use anyhow::Context;
use env_logger::{Builder, Env, Target};

use crate::config::Config;

/// Install the global logger.
///
/// The terminal is in raw mode on the alternate screen for the whole run,
/// so records never go to stderr: with a log file configured they are
/// appended there, otherwise no logger is installed and `log` stays a no-op.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;

    Ok(())
}
