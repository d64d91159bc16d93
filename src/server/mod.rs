//! # Server Module
//!
//! Mounts an [`App`](crate::app::App) route table on `may_minihttp`.
//!
//! ## Request Flow
//!
//! ```text
//! may_minihttp::Request
//!   └─ parse_request        headers, cookies, query string, JSON body
//!   └─ Router::route        method + path → Route, path params
//!   └─ Route::execute       hooks (may short-circuit) → handler
//!   └─ write_response       status line, content type, body
//! ```
//!
//! Requests that match no route are answered with
//! `404 {"error": "Not Found", "method": …, "path": …}`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_cookies, parse_query_params, parse_request, ParsedRequest};
pub use response::write_response;
pub use service::{health_response, AppService};
