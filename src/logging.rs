use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the JSON log subscriber, filtered by `RUST_LOG` (default `info`).
/// Callers attach it to the work they run instead of installing it
/// process-wide.
pub fn subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    json_subscriber(make_writer, filter)
}

/// Same as [`subscriber`] with a fixed filter directive; ignores `RUST_LOG`.
#[cfg(test)]
pub fn subscriber_with_filter<W>(
    make_writer: W,
    directives: &str,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    json_subscriber(make_writer, EnvFilter::new(directives))
}

fn json_subscriber<W>(make_writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_env_filter(filter)
        .with_writer(make_writer)
        .finish()
}

#[cfg(test)]
pub use capture::CapturedLogs;
