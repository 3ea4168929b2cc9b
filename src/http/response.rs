//! HTTP response building module
//!
//! JSON success and error bodies. Errors use the `{"detail": "..."}` shape.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;

use crate::logger::Logger;

pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build 200 response carrying a JSON document
pub fn build_json_response(
    document: &Value,
    server_name: &str,
    is_head: bool,
    logger: &dyn Logger,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(document) {
        Ok(bytes) => build_json_bytes(StatusCode::OK, bytes, server_name, is_head, logger),
        Err(e) => {
            logger.error(&format!("Failed to serialize response: {e}"));
            build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                server_name,
                is_head,
                logger,
            )
        }
    }
}

/// Build an error response with a `detail` message
pub fn build_error_response(
    status: StatusCode,
    detail: &str,
    server_name: &str,
    is_head: bool,
    logger: &dyn Logger,
) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "detail": detail }).to_string();
    build_json_bytes(status, body.into_bytes(), server_name, is_head, logger)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(server_name: &str, logger: &dyn Logger) -> Response<Full<Bytes>> {
    let mut response = build_error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        server_name,
        false,
        logger,
    );
    response
        .headers_mut()
        .insert("Allow", hyper::header::HeaderValue::from_static(ALLOWED_METHODS));
    response
}

/// Build 204 preflight response; CORS headers are added by the caller
pub fn build_options_response(server_name: &str, logger: &dyn Logger) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .header("Server", server_name)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(logger, "OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_json_bytes(
    status: StatusCode,
    bytes: Vec<u8>,
    server_name: &str,
    is_head: bool,
    logger: &dyn Logger,
) -> Response<Full<Bytes>> {
    let content_length = bytes.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(bytes)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(logger, status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(logger: &dyn Logger, status: &str, error: &hyper::http::Error) {
    logger.error(&format!("Failed to build {status} response: {error}"));
}
