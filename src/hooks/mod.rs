//! # Hooks Module
//!
//! Hooks are request-pipeline steps that run before a handler. A hook either
//! lets the request through (`None`) or ends the pipeline with a response.
//!
//! ## Built-in Hooks
//!
//! - [`ValidationHook::cookies`] (`ValidateCookies`) - validates request cookies against a JSON Schema
//! - [`ValidationHook::query`] (`ValidateQuery`) - validates query parameters against a JSON Schema
//!
//! - [`ValidationHook::headers`] (`ValidateHeaders`) - validates the lowercase header map
//! - `ValidatePathParams` - [`ValidationHook::new`] with [`crate::openapi::ParameterLocation::Path`]
//!
//! All of them reject the request with `400 Bad Request` when validation
//! fails and can describe their inputs as OpenAPI parameters.
//!
//! ## Example
//!
//! ```rust
//! use brrthooks::hooks::{validate_query, Hook, HookOptions};
//! use brrthooks::context::{Context, Request};
//! use http::Method;
//! use serde_json::json;
//!
//! let hook = validate_query(
//!     &json!({ "type": "object", "properties": { "limit": { "type": "integer" } } }),
//!     HookOptions::default(),
//! )
//! .unwrap();
//!
//! let ctx = Context::new(Request::new(Method::GET, "/").with_query(json!({ "limit": 10 })));
//! assert!(hook.run(&ctx).is_none());
//! ```

mod core;
mod error;
mod validation;

pub use self::core::{Hook, HookOptions};
pub use error::HookError;
pub use validation::{validate_cookies, validate_query, ValidationHook};
