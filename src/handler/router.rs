//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! CORS, route matching and dispatching.

use crate::config::AppState;
use crate::handler::memory;
use crate::http::{self, cors};
use crate::logger;
use crate::routing::{match_route, Route};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub origin: Option<&'a str>,
}

/// Main entry point for HTTP request handling.
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B: Body>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();
    let ctx = RequestContext {
        path,
        is_head: *method == Method::HEAD,
        origin: header_str(&req, "origin"),
    };
    let cors_config = &state.config.http.cors;

    let mut response = match method {
        &Method::GET | &Method::HEAD => route_request(&ctx, &state).await,
        &Method::OPTIONS => {
            let mut resp = http::build_options_response(
                &state.config.http.server_name,
                state.logger.as_ref(),
            );
            cors::apply_preflight(
                &mut resp,
                cors_config,
                ctx.origin,
                header_str(&req, "access-control-request-headers"),
            );
            return Ok(finish(&state, method, path, resp));
        }
        _ => {
            state
                .logger
                .warn(&format!("Method not allowed: {method} {path}"));
            http::build_405_response(&state.config.http.server_name, state.logger.as_ref())
        }
    };

    cors::apply(&mut response, cors_config, ctx.origin);
    Ok(finish(&state, method, path, response))
}

fn header_str<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Route request to the matching memory endpoint
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match match_route(ctx.path) {
        Route::Latest => memory::get_latest_memory(ctx, state).await,
        Route::Version(key) => memory::get_memory_version(ctx, state, key).await,
        Route::InvalidVersion {
            version,
            subversion,
        } => memory::reject_invalid_version(ctx, state, &version, &subversion),
        Route::NotFound => http::build_error_response(
            StatusCode::NOT_FOUND,
            "Not Found",
            &state.config.http.server_name,
            ctx.is_head,
            state.logger.as_ref(),
        ),
    }
}

/// Write the access log line and hand the response back
fn finish(
    state: &AppState,
    method: &Method,
    path: &str,
    response: Response<Full<Bytes>>,
) -> Response<Full<Bytes>> {
    if state.config.logging.access_log {
        let size = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        logger::log_access(
            state.logger.as_ref(),
            method.as_str(),
            path,
            response.status().as_u16(),
            size,
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logger::{CaptureLogger, Level, Logger};
    use http_body_util::{BodyExt, Empty};
    use serde_json::{json, Value};
    use std::path::Path;

    struct Harness {
        _dir: tempfile::TempDir,
        state: Arc<AppState>,
        logs: Arc<CaptureLogger>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_memory_dir("memory")
        }

        fn with_memory_dir(sub: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let mut cfg = Config::default_settings().unwrap();
            cfg.memory.dir = dir.path().join(sub).to_string_lossy().into_owned();
            let logs = Arc::new(CaptureLogger::new());
            let logger: Arc<dyn Logger> = logs.clone();
            let state = Arc::new(AppState::new(&cfg, logger));
            Self {
                _dir: dir,
                state,
                logs,
            }
        }

        fn memory_dir(&self) -> &Path {
            self.state.store.dir()
        }

        fn write(&self, name: &str, content: &str) {
            std::fs::create_dir_all(self.memory_dir()).unwrap();
            std::fs::write(self.memory_dir().join(name), content).unwrap();
        }

        async fn send(&self, method: Method, path: &str) -> (StatusCode, hyper::HeaderMap, Bytes) {
            let req = Request::builder()
                .method(method)
                .uri(path)
                .header("Origin", "https://client.example")
                .body(Empty::<Bytes>::new())
                .unwrap();
            let response = handle_request(req, Arc::clone(&self.state)).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.into_body().collect().await.unwrap().to_bytes();
            (status, headers, body)
        }

        async fn get(&self, path: &str) -> (StatusCode, Value) {
            let (status, _, body) = self.send(Method::GET, path).await;
            (status, serde_json::from_slice(&body).unwrap())
        }
    }

    #[tokio::test]
    async fn test_latest_returns_highest_version() {
        let h = Harness::new();
        h.write("v1-0.json", r#"{"version": "1.0"}"#);
        h.write("v1-2.json", r#"{"version": "1.2"}"#);

        let (status, body) = h.get("/memory/latest").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"version": "1.2"}));
        assert!(h.logs.contains(Level::Info, "Request for latest memory file"));
        assert!(h
            .logs
            .contains(Level::Info, "Successfully loaded memory file: v1-2.json"));
    }

    #[tokio::test]
    async fn test_latest_missing_directory() {
        let h = Harness::with_memory_dir("does-not-exist");

        let (status, body) = h.get("/memory/latest").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "No memory files found"}));
        assert!(h.logs.contains(Level::Warn, "No memory files found"));
    }

    #[tokio::test]
    async fn test_specific_version_not_found() {
        let h = Harness::new();
        h.write("v1-0.json", "{}");

        let (status, body) = h.get("/memory/v2-0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Memory version 2-0 not found"}));
        assert!(h.logs.contains(Level::Info, "Request for specific memory version: v2-0"));
        assert!(h.logs.contains(Level::Warn, "Memory version 2-0 not found"));
    }

    #[tokio::test]
    async fn test_specific_version_ignores_latest() {
        let h = Harness::new();
        h.write("v1-0.json", r#"{"old": true}"#);
        h.write("v5-5.json", r#"{"old": false}"#);

        let (status, body) = h.get("/memory/v1-0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"old": true}));
    }

    #[tokio::test]
    async fn test_body_preserves_document() {
        let h = Harness::new();
        h.write(
            "v2-0.json",
            "\u{feff}{\"zeta\": [1, 2.5, {\"b\": null, \"a\": \"x\"}], \"alpha\": false}",
        );

        let (status, _, body) = h.send(Method::GET, "/memory/v2-0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            r#"{"zeta":[1,2.5,{"b":null,"a":"x"}],"alpha":false}"#
        );
    }

    #[tokio::test]
    async fn test_malformed_file_then_recovery() {
        let h = Harness::new();
        h.write("v1-0.json", r#"{"fine": 1}"#);
        h.write("v3-0.json", "{oops");

        let (status, body) = h.get("/memory/latest").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error loading memory file: v3-0.json: "));
        assert!(h.logs.contains(Level::Error, "v3-0.json"));

        let (status, body) = h.get("/memory/v1-0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"fine": 1}));
    }

    #[tokio::test]
    async fn test_malformed_specific_version() {
        let h = Harness::new();
        h.write("v2-0.json", "{oops");

        let (status, body) = h.get("/memory/v2-0").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error loading memory file: v2-0.json: "));
        assert!(h.logs.contains(Level::Error, "v2-0.json"));
    }

    #[tokio::test]
    async fn test_unreadable_memory_dir_is_server_error() {
        let h = Harness::new();
        std::fs::write(h.memory_dir(), "not a directory").unwrap();

        let (status, body) = h.get("/memory/latest").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Error loading memory file: "));

        let (status, _) = h.get("/memory/v1-0").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_version_beyond_u64() {
        let h = Harness::new();
        let (status, body) = h.get("/memory/v99999999999999999999999-1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"detail": "Memory version 99999999999999999999999-1 not found"})
        );

        h.write("v99999999999999999999999-1.json", r#"{"big": true}"#);
        let (status, body) = h.get("/memory/v99999999999999999999999-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"big": true}));
    }

    #[tokio::test]
    async fn test_percent_encoded_version_path() {
        let h = Harness::new();
        h.write("v1-0.json", r#"{"one": 0}"#);

        let (status, body) = h.get("/memory/v%31-0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"one": 0}));
    }

    #[tokio::test]
    async fn test_unversioned_name_can_win() {
        let h = Harness::new();
        h.write("vdraft.json", r#"{"draft": true}"#);

        let (status, body) = h.get("/memory/latest").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"draft": true}));
    }

    #[tokio::test]
    async fn test_invalid_parameters() {
        let h = Harness::new();
        let (status, body) = h.get("/memory/vone-2").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let h = Harness::new();
        let (status, body) = h.get("/nothing/here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Not Found"}));
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let h = Harness::new();
        let (status, headers, _) = h.send(Method::POST, "/memory/latest").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let h = Harness::new();
        h.write("v1-0.json", r#"{"a": 1}"#);

        let (status, headers, body) = h.send(Method::HEAD, "/memory/latest").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["Content-Length"], "7");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let h = Harness::new();
        let (_, headers, _) = h.send(Method::GET, "/memory/latest").await;
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert!(headers.get("Access-Control-Allow-Credentials").is_none());

        let (status, headers, body) = h.send(Method::OPTIONS, "/memory/latest").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(headers["Access-Control-Allow-Methods"], "GET, HEAD, OPTIONS");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_access_log_line() {
        let h = Harness::new();
        h.write("v1-0.json", r#"{"a": 1}"#);
        let _ = h.send(Method::GET, "/memory/v1-0").await;
        assert!(h.logs.contains(Level::Info, "GET /memory/v1-0 - 200 (7 bytes)"));
    }
}
