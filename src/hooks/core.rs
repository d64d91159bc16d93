use crate::context::Context;
use crate::openapi::{ApiMetadata, Target};
use crate::response::HttpResponse;

/// A step of the request pipeline that runs before the handler.
pub trait Hook: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Inspect the request. `Some(response)` short-circuits the pipeline.
    fn run(&self, ctx: &Context) -> Option<HttpResponse>;

    /// Attach OpenAPI metadata describing this hook's inputs to `target`.
    fn register_openapi(&self, _metadata: &ApiMetadata, _target: &Target) {}
}

/// Options accepted by parameter validation hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookOptions {
    /// Describe the validated inputs as OpenAPI parameters. Unset behaves as `false`.
    pub openapi: Option<bool>,
}

impl HookOptions {
    /// Options with OpenAPI metadata enabled.
    #[must_use]
    pub fn openapi() -> Self {
        Self {
            openapi: Some(true),
        }
    }
}
