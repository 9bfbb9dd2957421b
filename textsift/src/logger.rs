// textsift/src/logger.rs
//! Logger bootstrap shared by the binary and the integration tests.

use log::LevelFilter;

/// Initializes the global logger.
///
/// When `level` is `Some`, it overrides whatever `RUST_LOG` asks for; when it
/// is `None`, the environment configuration is respected as-is. Calling this
/// more than once is harmless, which keeps test setup simple.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    // A second init attempt just means another test got here first.
    let _ = builder.try_init();
}
