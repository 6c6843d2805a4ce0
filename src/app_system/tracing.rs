/// Installs the global subscriber.
///
/// ```text
/// RUST_LOG=debug cargo run                           # everything
/// RUST_LOG=truck_booking::dispatch=debug,info cargo run  # one module in detail
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
