//! Logging capability handed to the scoring and statistics code.
//!
//! Library code never configures a subscriber; it reports through a
//! [`Logger`]. The binary installs a `tracing-subscriber` and uses
//! [`TracingLogger`], tests substitute a recording logger.

use tracing::{info, warn};

/// A sink for diagnostic messages
pub trait Logger {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards messages to the `tracing` macros
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

/// Keeps every message in memory; used by tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    pub infos: std::cell::RefCell<Vec<String>>,
    pub warnings: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
