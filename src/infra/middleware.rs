//! Middleware for modifying requests and responses.

use super::error::{ApiError, ClientError};
use axum::{
    body::{Body, Bytes, HttpBody as _},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use tower_http::trace::MakeSpan;

static X_REQUEST_ID: &str = "x-request-id";

/// Creates one span per request, tagged with the request id set by
/// [`SetRequestIdLayer`](tower_http::request_id::SetRequestIdLayer).
#[derive(Clone, Copy, Debug)]
pub(crate) struct MakeRequestIdSpan;

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

/// The maximum size of the request body to log.
const MAX_BODY_SIZE: u64 = 8192;

/// Log small request and response bodies at trace level.
pub(crate) async fn log_request_response(
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let (parts, body) = req.into_parts();
    let req = if fits(&body) {
        let bytes = buffer_and_print("Request", body).await?;
        Request::from_parts(parts, Body::from(bytes))
    } else {
        Request::from_parts(parts, body)
    };

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let res = if fits(&body) {
        let bytes = buffer_and_print("Response", body).await?;
        Response::from_parts(parts, Body::from(bytes))
    } else {
        Response::from_parts(parts, body)
    };

    Ok(res)
}

fn fits(body: &Body) -> bool {
    match body.size_hint().upper() {
        Some(n) => n <= MAX_BODY_SIZE,
        None => false,
    }
}

/// Read the entire body stream and store it in memory.
async fn buffer_and_print(direction: &str, body: Body) -> Result<Bytes, ApiError> {
    let body = body
        .collect()
        .await
        .map_err(|e| ClientError::BadRequest(format!("failed to read {direction} body: {e}")))?
        .to_bytes();

    if let Ok(body) = std::str::from_utf8(&body) {
        tracing::trace!("{} body = {:?}", direction, body);
    }

    Ok(body)
}
