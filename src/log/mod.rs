//! Diagnostic logging for network construction and simulation runs. Not to be confused with
//! the CSV output in [`crate::report`].
//!
//! Every module logs through the `log` facade, re-exported here. Output is silent until a
//! level is set, either by the runner's `--log-level` flag or from code. Targets follow the
//! module paths:
//!
//! * `epinet::network`: group and disease mutations at `info`, regeneration decisions at
//!   `debug`.
//! * `epinet::network::topology`: edge counts of every wiring pass at `debug`, population
//!   changes at `trace`.
//! * `epinet::simulation`: the init summary at `info`, one line per tick at `debug`, every
//!   node transition at `trace`.
//! * `epinet::random`: stream creation at `trace`. Capped at `info` unless overridden.
//!
//! ```rust
//! use epinet::log::{set_log_level, set_module_filter, LevelFilter};
//!
//! // Tick summaries, but only wiring totals from the topology builder.
//! set_log_level(LevelFilter::Debug);
//! set_module_filter("epinet::network::topology", LevelFilter::Info);
//! ```
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

use std::collections::BTreeMap;
use std::sync::{LazyLock, Mutex, PoisonError};

#[cfg(feature = "logging")]
use log4rs::Handle;
pub use log::{debug, error, info, trace, warn, LevelFilter};

use crate::error::EpiError;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;
const DEFAULT_MODULE_FILTERS: [(&str, LevelFilter); 1] = [("epinet::random", LevelFilter::Info)];

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// The process-wide filter state and, with the `logging` feature, the installed backend.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    /// Applies to every target without a module filter. `Off` silences them.
    pub(in crate::log) global_log_level: LevelFilter,
    /// Module path prefix to level.
    pub(in crate::log) module_filters: BTreeMap<String, LevelFilter>,

    #[cfg(feature = "logging")]
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        LogConfiguration {
            global_log_level: DEFAULT_LOG_LEVEL,
            module_filters: DEFAULT_MODULE_FILTERS
                .iter()
                .map(|&(module, level)| (module.to_string(), level))
                .collect(),

            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    /// Returns whether the filter changed.
    fn insert_module_filter(&mut self, module: &str, level: LevelFilter) -> bool {
        self.module_filters.insert(module.to_string(), level) != Some(level)
    }
}

fn with_configuration<T>(f: impl FnOnce(&mut LogConfiguration) -> T) -> T {
    let mut config = LOG_CONFIGURATION
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut config)
}

/// Logs everything. Same as `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Silences every target without a module filter.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

pub fn set_log_level(level: LevelFilter) {
    with_configuration(|config| {
        config.global_log_level = level;
        config.apply();
    });
}

/// Sets the global level from its name (`off`, `error`, `warn`, `info`, `debug`, `trace`,
/// case-insensitive).
///
/// # Errors
/// [`EpiError::InvalidField`] naming `log_level` if `level` is not a level name.
pub fn set_log_level_named(level: &str) -> Result<(), EpiError> {
    let filter: LevelFilter = level.parse().map_err(|_| EpiError::InvalidField {
        field: "log_level".to_string(),
        value: level.to_string(),
    })?;
    set_log_level(filter);
    Ok(())
}

/// Overrides the level for every target under `module_path`.
pub fn set_module_filter(module_path: &str, level: LevelFilter) {
    set_module_filters(&[(module_path, level)]);
}

/// Sets several module filters with a single backend reconfiguration.
pub fn set_module_filters(module_filters: &[(&str, LevelFilter)]) {
    with_configuration(|config| {
        let mut changed = false;
        for &(module, level) in module_filters {
            changed |= config.insert_module_filter(module, level);
        }
        if changed {
            config.apply();
        }
    });
}

/// Drops the override for `module_path`; the global level applies to it again.
pub fn remove_module_filter(module_path: &str) {
    with_configuration(|config| {
        if config.module_filters.remove(module_path).is_some() {
            config.apply();
        }
    });
}
