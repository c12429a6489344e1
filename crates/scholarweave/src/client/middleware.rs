//! Request logging middleware for the HTTP client.

use std::time::Instant;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Logs every outbound request with its status and latency.
///
/// Successful exchanges (any status) are logged at debug level; transport
/// failures at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLogging;

#[async_trait::async_trait]
impl Middleware for RequestLogging {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::debug!(
                %method,
                %url,
                status = response.status().as_u16(),
                elapsed_ms,
                "Backend request completed"
            ),
            Err(err) => tracing::warn!(
                %method,
                %url,
                elapsed_ms,
                error = %err,
                "Backend request failed"
            ),
        }

        result
    }
}
