// File: crates/chart-core/src/telemetry.rs
// Summary: Opt-in tracing subscriber setup for binaries embedding chart-core.

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (falls back to `default_filter`).
///
/// Returns false when the `telemetry` feature is off or a global subscriber already exists.
#[must_use]
pub fn init_default_tracing(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}
