use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{Settings, DEFAULT_LOG_FILTER};

/// Parse a filter directive, falling back to the default on bad input
fn filter(directive: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LOG_FILTER), false),
    }
}

/// Install the global subscriber: stderr by default, or an append-only log file
pub fn init(settings: &Settings) -> Result<()> {
    let (env_filter, valid) = filter(&settings.log_filter);
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false);

    let installed = match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    if !valid {
        tracing::warn!(directive = %settings.log_filter, "Ignoring invalid log filter");
    }
    Ok(())
}
