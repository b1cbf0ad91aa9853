/// Install the global tracing subscriber. Filter via `BIODATA_LOG`
/// (tracing env-filter syntax). Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("BIODATA_LOG").unwrap_or_else(|_| "biodata=info,sqlx=warn".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
