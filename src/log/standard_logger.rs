//! `log4rs` backend: a single stderr appender plus one logger per module filter.
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

use crate::log::LogConfiguration;

const APPENDER: &str = "stderr";
// ISO 8601 timestamp, colored level, target
const PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

impl LogConfiguration {
    fn build_config(&self) -> Result<Config, ConfigErrors> {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        let loggers = self
            .module_filters
            .iter()
            .map(|(module, level)| Logger::builder().build(module.clone(), *level));
        Config::builder()
            .appender(Appender::builder().build(APPENDER, Box::new(stderr)))
            .loggers(loggers)
            .build(Root::builder().appender(APPENDER).build(self.global_log_level))
    }

    /// Installs the backend on first use and reconfigures it afterwards.
    pub(in crate::log) fn apply(&mut self) {
        let config = match self.build_config() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("epinet: invalid log configuration: {e}");
                return;
            }
        };
        if let Some(handle) = &self.root_handle {
            handle.set_config(config);
            return;
        }
        match log4rs::init_config(config) {
            Ok(handle) => self.root_handle = Some(handle),
            // an embedding application installed its own logger first
            Err(e) => eprintln!("epinet: logging not installed: {e}"),
        }
    }
}
