// sicr/src/logger.rs
//! Logger setup for the `sicr` binary.
//!
//! `RUST_LOG` is honoured unless the command line forces a level.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global `env_logger`, defaulting to `warn`.
///
/// An explicit `level` overrides `RUST_LOG`. Calling this twice is harmless;
/// the second call is ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None).format_target(false);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}
