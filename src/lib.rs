//! # brrthooks
//!
//! Request hooks for coroutine-powered HTTP services built on `may_minihttp`.
//! The headline hooks validate a request's cookies or query parameters
//! against a JSON Schema and, on request, describe those parameters as
//! OpenAPI metadata.
//!
//! ## Architecture
//!
//! - **[`hooks`]** - the [`hooks::Hook`] contract and the validation hooks
//!   (`ValidateCookies`, `ValidateQuery`, plus headers and path params)
//! - **[`validator`]** - JSON Schema engine behind the hooks, and settings
//! - **[`openapi`]** - parameter metadata derived from schemas, keyed by
//!   controller or action
//! - **[`app`]** - controllers, actions and the flattened route table
//! - **[`router`]** - regex path matching for `:name` / `{name}` parameters
//! - **[`server`]** - mounts an [`app::App`] on `may_minihttp`
//! - **[`context`]** / **[`response`]** - what hooks read and return
//! - **[`config`]**, **[`runtime_config`]**, **[`telemetry`]** - YAML config,
//!   coroutine runtime and logging for the binary
//!
//! ## Request flow
//!
//! ```text
//! socket -> server::parse_request -> Router::route -> Context
//!        -> controller hooks -> action hooks -> handler -> HttpResponse
//! ```
//!
//! The first hook returning `Some(response)` ends the pipeline. Validation
//! hooks answer `400` with `{ "<field>": [errors...] }`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use brrthooks::app::{Action, App, Controller};
//! use brrthooks::hooks::{validate_query, HookOptions};
//! use brrthooks::response::HttpResponse;
//! use brrthooks::server::{AppService, HttpServer};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let query = validate_query(
//!         &json!({ "type": "object", "properties": { "q": { "type": "string" } } }),
//!         HookOptions::default(),
//!     )?;
//!     let app = App::new(vec![Controller::new("SearchController")
//!         .action(Action::get("/search", "search", |_ctx| HttpResponse::ok("Success")).hook(query))]);
//!
//!     let handle = HttpServer(AppService::new(Arc::new(app))).start("127.0.0.1:8080")?;
//!     if handle.join().is_err() {
//!         anyhow::bail!("server coroutine panicked");
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod context;
pub mod hooks;
pub mod openapi;
pub mod response;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod telemetry;
pub mod validator;

pub use app::{App, Route};
pub use context::{Context, Request};
pub use hooks::{validate_cookies, validate_query, Hook, HookError, HookOptions, ValidationHook};
pub use openapi::{ApiMetadata, ApiParameter, ParameterLocation, Target};
pub use response::HttpResponse;
pub use router::Router;
