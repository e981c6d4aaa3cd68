//! Backend used without the `logging` feature. Nothing is printed; only the `log` crate's
//! max level is kept in sync so disabled call sites stay cheap.
use crate::log::LogConfiguration;

impl LogConfiguration {
    pub(in crate::log) fn apply(&mut self) {
        log::set_max_level(self.global_log_level);
    }
}
