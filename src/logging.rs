/// Logger initialisation for the `metro-graph` binary
///
/// Library code logs through the `log` facade. The binary installs
/// `env_logger` with an `info` default in development builds, or when the
/// `console_logging` feature is enabled, and `warn` otherwise. `RUST_LOG`
/// always takes precedence.
///
/// # Examples
///
/// ```no_run
/// metro_graph::logging::init();
/// log::info!("network loaded");
/// ```
pub fn init() {
    let default_filter = if cfg!(any(debug_assertions, feature = "console_logging")) {
        "info"
    } else {
        "warn"
    };

    // A second initialisation (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Run `f`, logging its elapsed time under `label` when `perf_timing` is enabled
#[inline]
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    if !cfg!(feature = "perf_timing") {
        return f();
    }
    let started = std::time::Instant::now();
    let result = f();
    log::debug!("{label}: {:.3}ms", started.elapsed().as_secs_f64() * 1000.0);
    result
}
