//! HTTP protocol layer
//!
//! Response builders, CORS header injection, and MIME lookup, decoupled from
//! the request handling business logic.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use cors::apply_cors_headers;
pub use response::{
    build_404_response, build_405_response, build_file_response, build_html_response,
    build_options_response, build_redirect_response,
};
