//! Tracing setup for hosts embedding the chart pipeline.
//!
//! The boundary is chatty at full verbosity: every outbound command, every
//! drained surface signal, and every row the pivot skips emits an event.
//! [`init_boundary_tracing`] installs a compact subscriber that keeps this
//! crate at `debug` and everything else at `info`, so batch outcomes and
//! dropped charts are visible without per-command noise. `RUST_LOG`
//! overrides the default; hosts with their own subscriber should skip this
//! and add a `chart_bridge` directive to their filter instead.

/// Default filter when `RUST_LOG` is unset: batch/gate events from this
/// crate, info elsewhere. Per-command `trace!` stays off unless requested.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "info,chart_bridge=debug";

/// Installs the boundary subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or
/// if the host application already set a global subscriber.
#[must_use]
pub fn init_boundary_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        // Targets stay on so pipeline, bridge, and pivot events are
        // attributable when a host's own modules log at debug too.
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
