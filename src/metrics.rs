//! Prometheus counters for screens, normalization and price checks.

use crate::types::NormalizeMode;
use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

/// Installs the Prometheus exporter on `0.0.0.0:{port}`. Idempotent; must run inside tokio.
pub fn init_metrics(port: u16) {
    INIT.call_once(|| {
        let addr: SocketAddr = ([0, 0, 0, 0], port).into();
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
        match builder.install() {
            Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
            Err(e) => warn!("Prometheus exporter install failed: {}", e),
        }
    });
}

pub struct PipelineMetrics;

impl PipelineMetrics {
    pub fn record_screen(rows: usize) {
        ::metrics::counter!("screener_requests_total").increment(1);
        ::metrics::counter!("screener_rows_total").increment(rows as u64);
    }

    pub fn record_normalize(mode: NormalizeMode, ok: bool) {
        let outcome = if ok { "ok" } else { "malformed" };
        ::metrics::counter!("normalize_total", "mode" => mode.as_str(), "outcome" => outcome)
            .increment(1);
    }

    pub fn record_price_check(outcome: &'static str) {
        ::metrics::counter!("price_checks_total", "outcome" => outcome).increment(1);
    }
}
