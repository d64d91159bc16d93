//! # App Module
//!
//! Declares handlers and the hooks that guard them, then flattens everything
//! into a route table the server adapter can mount.
//!
//! ## Overview
//!
//! - [`Action`] - one handler bound to an HTTP method and path, with its own hooks
//! - [`Controller`] - a named group of actions sharing a path prefix and hooks;
//!   controllers nest
//! - [`App`] - the flattened route table plus the OpenAPI metadata registered
//!   by every hook
//!
//! Hooks run parent-first: outer controller hooks, then inner controller hooks,
//! then action hooks. The first hook that returns a response ends the pipeline.
//!
//! ## Example
//!
//! ```rust
//! use brrthooks::app::{Action, App, Controller};
//! use brrthooks::hooks::{validate_query, HookOptions};
//! use brrthooks::response::HttpResponse;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "limit": { "type": "integer" } }
//! });
//!
//! let products = Controller::new("ProductController")
//!     .path("/products")
//!     .action(
//!         Action::get("/", "list", |_ctx| HttpResponse::ok(json!([])))
//!             .hook(validate_query(&schema, HookOptions::openapi()).unwrap()),
//!     );
//!
//! let app = App::new(vec![products]);
//! assert_eq!(app.routes().len(), 1);
//! assert_eq!(app.routes()[0].path, "/products");
//! ```

mod controller;
mod core;

pub use self::controller::{attach_handler, Action, Controller, Handler};
pub use self::core::{join_paths, App, Route};
