use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Emits one log line per inbound request, keyed by method and path, before
/// the rest of the stack runs.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match method.as_str() {
        "POST" => info!("[POST] Creating a resource: {}", path),
        "GET" => info!("[GET] Data request: {}", path),
        "PUT" => info!("[PUT] Updating the resource: {}", path),
        "DELETE" => info!("[DELETE] Deleting a resource: {}", path),
        _ => info!("[{}] API request: {}", method, path),
    }

    next.run(req).await
}
