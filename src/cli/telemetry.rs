//! Tracing subscriber setup driven by the `-v` verbosity count.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initialize the global tracing subscriber.
///
/// A `RUST_LOG` environment filter always wins over the verbosity flag.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init(level: Option<tracing::Level>) -> Result<()> {
    let default_level = level.unwrap_or(tracing::Level::ERROR);

    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
