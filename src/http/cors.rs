//! CORS header handling
//!
//! Simple requests get `Access-Control-Allow-Origin`; preflight requests
//! additionally get the allowed methods and echoed request headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderValue};
use hyper::Response;

use super::response::ALLOWED_METHODS;
use crate::config::CorsConfig;

/// Preflight cache lifetime in seconds
const MAX_AGE: &str = "600";

/// Value for `Access-Control-Allow-Origin`, or `None` if the origin is not allowed
pub fn allow_origin_value(cors: &CorsConfig, origin: Option<&str>) -> Option<String> {
    if !cors.enabled {
        return None;
    }
    let allow_all = cors.allow_origins.iter().any(|o| o == "*");
    match origin {
        // Wildcard is not valid together with credentials, echo the origin instead
        Some(o) if allow_all && cors.allow_credentials => Some(o.to_string()),
        _ if allow_all => Some("*".to_string()),
        Some(o) if cors.allow_origins.iter().any(|allowed| allowed == o) => Some(o.to_string()),
        _ => None,
    }
}

/// Add CORS headers for a simple (non-preflight) request
pub fn apply(response: &mut Response<Full<Bytes>>, cors: &CorsConfig, origin: Option<&str>) {
    let Some(value) = allow_origin_value(cors, origin) else {
        return;
    };
    insert_origin_headers(response.headers_mut(), cors, &value);
}

/// Add CORS headers to a preflight response
pub fn apply_preflight(
    response: &mut Response<Full<Bytes>>,
    cors: &CorsConfig,
    origin: Option<&str>,
    request_headers: Option<&str>,
) {
    let Some(value) = allow_origin_value(cors, origin) else {
        return;
    };
    let headers = response.headers_mut();
    insert_origin_headers(headers, cors, &value);
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    if let Some(requested) = request_headers.and_then(|h| HeaderValue::from_str(h).ok()) {
        headers.insert("Access-Control-Allow-Headers", requested);
    }
    headers.insert("Access-Control-Max-Age", HeaderValue::from_static(MAX_AGE));
}

fn insert_origin_headers(headers: &mut HeaderMap, cors: &CorsConfig, value: &str) {
    if let Ok(v) = HeaderValue::from_str(value) {
        headers.insert("Access-Control-Allow-Origin", v);
    }
    if value != "*" {
        headers.insert("Vary", HeaderValue::from_static("Origin"));
    }
    if cors.allow_credentials {
        headers.insert(
            "Access-Control-Allow-Credentials",
            HeaderValue::from_static("true"),
        );
    }
}
