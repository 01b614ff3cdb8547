// src/core/logging.rs

use env_logger::Env;

use crate::config::SmallRootsConfig;

/// Installs an `env_logger` backend for the `log` facade.
///
/// `SMALL_ROOTS_LOG` overrides the configured level and `SMALL_ROOTS_LOG_STYLE`
/// controls colouring. Returns false when a logger was already installed.
pub fn init_logging(config: &SmallRootsConfig) -> bool {
    let env = Env::default()
        .filter_or("SMALL_ROOTS_LOG", config.log_level.as_str())
        .write_style_or("SMALL_ROOTS_LOG_STYLE", "auto");

    env_logger::Builder::from_env(env).try_init().is_ok()
}

/// Logger for tests: captured output, never fails on repeated calls.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
