// src/monitoring/logging.rs

use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

pub fn setup_logging() {
    // Filtre lu dans RUST_LOG, "info" par défaut.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .init();
}
