use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for the process.
///
/// Default level is `info` (`debug` with the verbosity flag); `RUST_LOG`
/// overrides both.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}
