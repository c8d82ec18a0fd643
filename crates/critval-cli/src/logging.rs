use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber writing to stderr.
///
/// `RUST_LOG` directives take precedence; otherwise the level follows the
/// number of `-v` flags (warn, debug, trace).
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
