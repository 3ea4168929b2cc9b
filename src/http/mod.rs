//! HTTP protocol layer module
//!
//! Response builders and CORS headers, independent of the memory routes.

pub mod cors;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_405_response, build_error_response, build_json_response, build_options_response,
};
