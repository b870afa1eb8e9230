use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter, like `RUST_LOG`.
pub const LOG_ENV: &str = "SYMWIZ_LOG";

fn filter(verbose: bool) -> EnvFilter {
    for var in [LOG_ENV, EnvFilter::DEFAULT_ENV] {
        if let Ok(filter) = EnvFilter::try_from_env(var) {
            return filter;
        }
    }
    EnvFilter::new(if verbose { "debug" } else { "warn" })
}

/// Sends log events to stderr. Only the first call in a process installs the subscriber.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
