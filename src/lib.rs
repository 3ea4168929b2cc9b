//! Serves versioned JSON memory snapshots over HTTP.
//!
//! A memory directory holds files named `v<major>-<minor>.json`.
//! `GET /memory/latest` returns the file with the highest version,
//! `GET /memory/v{major}-{minor}` returns one specific version.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod memory;
pub mod routing;
pub mod server;
