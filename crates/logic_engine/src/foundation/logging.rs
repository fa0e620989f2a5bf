//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Panics if a logger has already been installed; use [`try_init`] from
/// tests where several cases may race to install one.
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring an already-installed logger
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}
