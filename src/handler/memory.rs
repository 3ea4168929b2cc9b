//! Memory endpoints
//!
//! Each handler resolves a memory file through the store and maps the
//! outcome onto a status code. Failures never escape as errors.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::memory::{LoadedMemory, MemoryError, VersionKey};

/// `GET /memory/latest`
pub async fn get_latest_memory(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    state.logger.info("Request for latest memory file");
    let result = state.store.latest().await;
    respond(ctx, state, result)
}

/// `GET /memory/v{version}-{subversion}`
pub async fn get_memory_version(
    ctx: &RequestContext<'_>,
    state: &AppState,
    key: VersionKey,
) -> Response<Full<Bytes>> {
    state
        .logger
        .info(&format!("Request for specific memory version: v{key}"));
    let result = state.store.version(key).await;
    respond(ctx, state, result)
}

/// Path parameters that are not non-negative integers
pub fn reject_invalid_version(
    ctx: &RequestContext<'_>,
    state: &AppState,
    version: &str,
    subversion: &str,
) -> Response<Full<Bytes>> {
    state.logger.warn(&format!(
        "Invalid memory version requested: v{version}-{subversion}"
    ));
    http::build_error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "version and subversion must be non-negative integers",
        &state.config.http.server_name,
        ctx.is_head,
        state.logger.as_ref(),
    )
}

fn respond(
    ctx: &RequestContext<'_>,
    state: &AppState,
    result: Result<LoadedMemory, MemoryError>,
) -> Response<Full<Bytes>> {
    let server_name = &state.config.http.server_name;
    let logger = state.logger.as_ref();
    match result {
        Ok(loaded) => {
            logger.info(&format!(
                "Successfully loaded memory file: {}",
                loaded.file_name
            ));
            http::build_json_response(&loaded.document, server_name, ctx.is_head, logger)
        }
        Err(e) if e.is_not_found() => {
            logger.warn(&e.to_string());
            http::build_error_response(
                StatusCode::NOT_FOUND,
                &e.to_string(),
                server_name,
                ctx.is_head,
                logger,
            )
        }
        Err(e) => {
            // Display of load errors starts with the file name
            let detail = format!("Error loading memory file: {e}");
            logger.error(&detail);
            http::build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &detail,
                server_name,
                ctx.is_head,
                logger,
            )
        }
    }
}
