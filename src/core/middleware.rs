use crate::core::error::AppError;
use crate::features::auth::gate::{self, AdminGate};
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Largest body the admin gate will buffer while looking for a credential
const MAX_ADMIN_BODY_BYTES: usize = 1024 * 1024;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response();

            Err(response)
        })
    }
}

/// Reject admin requests that do not carry the shared secret.
///
/// The `Authorization` header wins; otherwise a JSON body is buffered, checked
/// for `admin_password`, and handed on unchanged to the handler.
pub async fn admin_auth_middleware(
    State(gate): State<Arc<AdminGate>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(credential) = gate::header_credential(req.headers()) {
        gate.authorize(Some(&credential))?;
        return Ok(next.run(req).await);
    }

    if !gate::is_json(req.headers()) {
        gate.authorize(None)?;
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    // An unreadable or oversized body carries no usable credential
    let bytes = axum::body::to_bytes(body, MAX_ADMIN_BODY_BYTES)
        .await
        .unwrap_or_else(|e| {
            tracing::debug!("Admin request body not readable: {}", e);
            Bytes::new()
        });

    gate.authorize(gate::body_credential(&bytes).as_deref())?;

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
