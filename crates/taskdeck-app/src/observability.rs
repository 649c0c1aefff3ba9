use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Install a compact stderr subscriber for front ends embedding the store.
///
/// `RUST_LOG` directives are honored on top of the INFO default. Calling this
/// more than once (or after another subscriber was set) is a no-op.
pub fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
