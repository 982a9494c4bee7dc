//! Logger capability
//!
//! Invoked directly, never resolved through a path. Messages go to
//! `tracing` under [`LOG_TARGET`]; whichever subscriber is installed decides
//! formatting and destination. Emitting an event cannot fail, so the caller
//! is never interrupted by logging.

use tracing::{error, info, warn};

use crate::constants::LOG_TARGET;

/// Structured info/warning/error sinks
#[derive(Debug, Clone, Default)]
pub struct Logger {
    component: Option<String>,
}

impl Logger {
    /// A logger without a component tag
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger tagging every event with `component`
    pub fn for_component(component: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
        }
    }

    /// The component tag, if any
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Log at info level
    pub fn info(&self, message: &str) {
        info!(target: LOG_TARGET, component = self.component(), "{message}");
    }

    /// Log at warning level
    pub fn warning(&self, message: &str) {
        warn!(target: LOG_TARGET, component = self.component(), "{message}");
    }

    /// Log at error level
    pub fn error(&self, message: &str) {
        error!(target: LOG_TARGET, component = self.component(), "{message}");
    }
}
