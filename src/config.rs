//! Runtime settings taken from the environment

use std::ffi::OsString;
use std::path::PathBuf;

/// Tracing filter directive, e.g. `debug` or `bugme=trace`
pub const LOG_FILTER_VAR: &str = "BUGME_LOG";
/// When set, log lines are appended to this file instead of stderr
pub const LOG_FILE_VAR: &str = "BUGME_LOG_FILE";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let defaults = Self::default();
        let set = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            log_filter: set(LOG_FILTER_VAR)
                .map(|value| value.to_string_lossy().into_owned())
                .unwrap_or(defaults.log_filter),
            log_file: set(LOG_FILE_VAR).map(PathBuf::from),
        }
    }
}
