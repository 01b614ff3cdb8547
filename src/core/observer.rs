// src/core/observer.rs
//
// Progress reporting for the small-roots pipeline. Every stage receives an
// observer by reference instead of writing to a process-wide logger directly,
// so callers decide where diagnostics go (the `log` facade, a test buffer,
// or nowhere).

use log::Level;
use std::cell::RefCell;

/// Receives leveled progress messages from the pipeline.
pub trait ProgressObserver {
    fn notify(&self, level: Level, message: &str);

    fn is_enabled(&self, _level: Level) -> bool {
        true
    }
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &T {
    fn notify(&self, level: Level, message: &str) {
        (**self).notify(level, message)
    }

    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }
}

/// Forwards every message to the `log` facade under the `small_roots` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn notify(&self, level: Level, message: &str) {
        log::log!(target: "small_roots", level, "{}", message);
    }

    fn is_enabled(&self, level: Level) -> bool {
        log::log_enabled!(target: "small_roots", level)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn notify(&self, _level: Level, _message: &str) {}

    fn is_enabled(&self, _level: Level) -> bool {
        false
    }
}

/// Keeps messages in memory, mostly useful in tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        RecordingObserver::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages
            .borrow()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl ProgressObserver for RecordingObserver {
    fn notify(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}
