//! Request handler module
//!
//! Request dispatch and the memory endpoints behind it.

pub mod memory;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
