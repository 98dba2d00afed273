//! Per-request tracing.

use std::future::Future;
use std::time::Instant;

use tracing::Instrument;

use crate::response::Response;

/// Runs `fut` inside a `request` span and logs the outcome once it resolves.
///
/// Server errors are logged at `warn`, everything else at `info`.
pub(crate) async fn traced<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = tracing::info_span!("request", %method, %path);
    async move {
        let started = Instant::now();
        let response = fut.await;
        let status = u16::from(response.status_code());
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        if status >= 500 {
            tracing::warn!(status, latency_ms, "request failed");
        } else {
            tracing::info!(status, latency_ms, "request completed");
        }
        response
    }
    .instrument(span)
    .await
}
