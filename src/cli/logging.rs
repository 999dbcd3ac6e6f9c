//! Module implementing logging for the application.
//!
//! Records are emitted through the standard `log` macros
//! and routed to a `slog` logger writing to standard error.

use std::env;

use log::{self, SetLoggerError};
use slog::{self, Drain, FilterLevel, Logger};
use slog_async;
use slog_envlogger::LogBuilder;
use slog_scope::{self, GlobalLoggerGuard};
use slog_stdlog;
use slog_term;


/// Environment variable with additional logging filters (same syntax as `env_logger`).
const LOG_FILTER_VAR: &str = "RUST_LOG";

// Default logging level when no -v / -q flags were passed.
const DEFAULT_FILTER: FilterLevel = FilterLevel::Warning;


/// Initialize logging with given verbosity.
/// The verbosity value has the same meaning as in args::Options::verbosity.
///
/// Returned guard must be kept alive for as long as the logging is needed;
/// dropping it flushes any pending log records.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let level = filter_level(verbosity);

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();

    let mut builder = LogBuilder::new(drain).filter(None, level);
    if let Ok(filters) = env::var(LOG_FILTER_VAR) {
        builder = builder.parse(&filters);
    }
    let drain = slog_async::Async::new(builder.build().fuse()).build().fuse();

    let logger = Logger::root(drain, slog::o!());
    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log::Level::Trace)?;

    debug!("Logging initialized at {:?} level", level);
    Ok(guard)
}


/// Determine the logging level from the verbosity value.
fn filter_level(verbosity: isize) -> FilterLevel {
    match verbosity {
        v if v <= -2 => FilterLevel::Critical,
        -1 => FilterLevel::Error,
        0 => DEFAULT_FILTER,
        1 => FilterLevel::Info,
        2 => FilterLevel::Debug,
        _ => FilterLevel::Trace,
    }
}


#[cfg(test)]
mod tests {
    use slog::FilterLevel;
    use super::filter_level;

    #[test]
    fn verbosity_levels() {
        assert_eq!(FilterLevel::Critical, filter_level(-5));
        assert_eq!(FilterLevel::Error, filter_level(-1));
        assert_eq!(FilterLevel::Warning, filter_level(0));
        assert_eq!(FilterLevel::Info, filter_level(1));
        assert_eq!(FilterLevel::Debug, filter_level(2));
        assert_eq!(FilterLevel::Trace, filter_level(7));
    }
}
