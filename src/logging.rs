// Conditional logging macros - only active in debug builds

use std::fs::File;

/// Where log output lands while the TUI owns the terminal.
pub const LOG_FILE: &str = "factle-debug.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Install the `env_logger` backend, honoring `RUST_LOG`. With `log_to_file`
/// set the stream is redirected to [`LOG_FILE`]; if that file cannot be
/// created, logging stays uninstalled rather than writing over the screen.
pub fn init(log_to_file: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if log_to_file {
        match File::create(LOG_FILE) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => return,
        }
    }
    let _ = builder.try_init();
}
