//! Logging with colored module prefixes.
//!
//! All diagnostics go through the `log!` macro. Failures during indexing or
//! loading are reported here and never surface as hard errors to callers.
//!
//! # Example
//!
//! ```ignore
//! log!("index"; "collected {} posts", count);
//! log!("watch"; "{} changed, re-indexing...", path.display());
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stderr};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write one prefixed line to stderr.
///
/// Multiline messages keep the prefix on the first line only, so error
/// chains from anyhow stay readable.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
}

/// Apply a stable color per module name.
fn colorize_prefix(module: &str) -> ColoredString {
    let bracketed = format!("[{module}]");
    match module {
        "index" => bracketed.green().bold(),
        "extract" => bracketed.cyan(),
        "load" => bracketed.blue().bold(),
        "watch" => bracketed.yellow().bold(),
        "config" => bracketed.magenta(),
        _ => bracketed.white(),
    }
}
