//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shared_config_reloads_total` (counter): reloads by `result` = ok | error
//! - `shared_config_keys` (gauge): key count of the live map
//! - `shared_config_lookups_total` (counter): lookups served by the actor
//!
//! Recording is a no-op until a recorder is installed, so library users
//! pay nothing unless they call [`init_metrics`] or install their own.

use std::net::SocketAddr;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a load or reload.
pub fn record_reload(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!("shared_config_reloads_total", "result" => result).increment(1);
}

/// Record the size of the map that is now live.
pub fn record_key_count(keys: usize) {
    metrics::gauge!("shared_config_keys").set(keys as f64);
}

/// Record one served lookup.
pub fn record_lookup() {
    metrics::counter!("shared_config_lookups_total").increment(1);
}
