// Logging init: stderr only, quiet unless asked.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins; otherwise only warnings are
/// shown, or debug output for this crate when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "warn,vkcc_cli=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
