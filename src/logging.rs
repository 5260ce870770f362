use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Build the log dispatcher for a run. Logs go to stderr so the preview on stdout stays
/// clean. `RUST_LOG` directives are applied on top of the default level.
pub fn dispatch(verbose: bool) -> Dispatch {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    Dispatch::new(subscriber)
}

#[cfg(test)]
pub(crate) use capture::capture_logs;
