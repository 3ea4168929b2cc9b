//! Routing module
//!
//! Maps request paths onto the memory endpoints:
//! - `/memory/latest`
//! - `/memory/v{version}-{subversion}`

mod matcher;

pub use matcher::{match_route, Route};
