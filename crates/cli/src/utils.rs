use std::error::Error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Initializes a tracing subscriber writing to stderr.
///
/// `RUST_LOG` directives are applied on top of `level`.
pub fn subscriber(level: LevelFilter) {
    tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::builder().with_default_directive(level.into()).from_env_lossy())
        .init();
}

/// Deduplicates a chain of errors.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes: Vec<String> =
        eyre::Chain::new(error).map(|cause| cause.to_string().trim().to_string()).collect();
    // Deduplicate the common pattern `msg1: msg2; msg2` -> `msg1: msg2`.
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}
