//! # Router Module
//!
//! Matches incoming requests against the application's route table.
//!
//! ## Overview
//!
//! At startup every route path (e.g. `/foo/:id/bar/{id2}`) is compiled into an
//! anchored regex; at request time the router tests the method and path against
//! each compiled route in declaration order and extracts path parameters.
//!
//! ## Matching Rules
//!
//! - Parameters are written `:name` or `{name}` and match one non-empty segment
//! - A single trailing slash on the request path is tolerated
//! - The HTTP method must match exactly; a path served only for other methods
//!   is a miss (404), not a 405
//!
//! ## Example
//!
//! ```rust
//! use brrthooks::app::{attach_handler, App};
//! use brrthooks::response::HttpResponse;
//! use brrthooks::router::Router;
//! use http::Method;
//!
//! let app = App::new(vec![attach_handler(Method::GET, "/foo/:id", |_ctx| {
//!     HttpResponse::ok("Success")
//! })]);
//! let router = Router::new(app.routes());
//!
//! let matched = router.route(&Method::GET, "/foo/12/").unwrap();
//! assert_eq!(matched.get_path_param("id"), Some("12"));
//! assert!(router.route(&Method::POST, "/foo/12").is_none());
//! ```

mod core;

pub use self::core::{RouteMatch, Router, SUPPORTED_METHODS};
