use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_number;

/// Request logging middleware
///
/// Logs elapsed ms, response size, status, method and path.
/// Responses with status >= 400 are logged at warn.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Buffer the body to get its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                "{:>5}ms | {:>12} | {} {:>6} {} | {}",
                start.elapsed().as_millis(),
                "error",
                parts.status.as_u16(),
                method,
                uri.path(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed = start.elapsed().as_millis();
    let size = format_number(bytes.len());
    let status = parts.status.as_u16();
    if parts.status.is_client_error() || parts.status.is_server_error() {
        tracing::warn!(
            "{:>5}ms | {:>12} | {} {:>6} {}",
            elapsed,
            size,
            status,
            method,
            uri.path()
        );
    } else {
        tracing::info!(
            "{:>5}ms | {:>12} | {} {:>6} {}",
            elapsed,
            size,
            status,
            method,
            uri.path()
        );
    }

    Response::from_parts(parts, Body::from(bytes))
}
