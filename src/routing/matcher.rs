//! Route matching module
//!
//! Resolves a request path to a memory route and extracts path parameters.
//! Paths are percent-decoded before matching.

use regex::Regex;
use std::sync::OnceLock;

use crate::memory::VersionKey;

pub const LATEST_PATH: &str = "/memory/latest";

/// A resolved route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /memory/latest`
    Latest,
    /// `GET /memory/v{version}-{subversion}`
    Version(VersionKey),
    /// Version route shape with parameters that are not non-negative integers
    InvalidVersion { version: String, subversion: String },
    /// Anything else
    NotFound,
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Greedy first segment: "v1-2-3" splits as ("1-2", "3")
    PATTERN.get_or_init(|| {
        Regex::new(r"^/memory/v([^/]+)-([^/]+)$").expect("valid route pattern")
    })
}

/// Find the route for a request path
pub fn match_route(raw_path: &str) -> Route {
    // Escapes that are not valid UTF-8 cannot name a memory route
    let Ok(path) = urlencoding::decode(raw_path) else {
        return Route::NotFound;
    };

    // Exact path match takes priority
    if path == LATEST_PATH {
        return Route::Latest;
    }

    let Some(caps) = version_pattern().captures(&path) else {
        return Route::NotFound;
    };
    let (version, subversion) = (&caps[1], &caps[2]);
    // Any number of decimal digits, no sign
    match VersionKey::from_digits(version, subversion) {
        Some(key) => Route::Version(key),
        None => Route::InvalidVersion {
            version: version.to_string(),
            subversion: subversion.to_string(),
        },
    }
}
