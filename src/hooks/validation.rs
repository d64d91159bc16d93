//! Cookie and query validation hooks.
//!
//! `ValidateCookies` and `ValidateQuery` share this implementation; they only
//! differ in which request field they read and which OpenAPI location they
//! describe. The same hook also validates headers (`ValidateHeaders`, keys are
//! lowercase) and router path parameters (`ValidatePathParams`); both are
//! string maps, so pair them with `coerce_types` for non-string properties.

use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

use super::{Hook, HookError, HookOptions};
use crate::context::{string_map_to_value, Context};
use crate::openapi::{derive_api_parameters, ApiMetadata, ApiParameter, ParameterLocation, Target};
use crate::response::HttpResponse;
use crate::validator::{coerce_params, JsonSchemaValidator, SchemaValidator, ValidationSettings};

/// Validates one request field (cookies or query) against an object schema.
#[derive(Clone)]
pub struct ValidationHook {
    location: ParameterLocation,
    schema: Arc<Value>,
    validator: Arc<dyn SchemaValidator>,
    settings: ValidationSettings,
    api_parameters: Option<Vec<ApiParameter>>,
}

/// Build a `ValidateCookies` hook with default settings.
///
/// # Errors
///
/// See [`ValidationHook::new`].
pub fn validate_cookies(schema: &Value, options: HookOptions) -> Result<ValidationHook, HookError> {
    ValidationHook::cookies(schema, options)
}

/// Build a `ValidateQuery` hook with default settings.
///
/// # Errors
///
/// See [`ValidationHook::new`].
pub fn validate_query(schema: &Value, options: HookOptions) -> Result<ValidationHook, HookError> {
    ValidationHook::query(schema, options)
}

impl ValidationHook {
    /// `ValidateCookies`: validate `ctx.request.cookies`.
    ///
    /// # Errors
    ///
    /// See [`ValidationHook::new`].
    pub fn cookies(schema: &Value, options: HookOptions) -> Result<Self, HookError> {
        Self::new(ParameterLocation::Cookie, schema, options)
    }

    /// `ValidateQuery`: validate `ctx.request.query`.
    ///
    /// # Errors
    ///
    /// See [`ValidationHook::new`].
    pub fn query(schema: &Value, options: HookOptions) -> Result<Self, HookError> {
        Self::new(ParameterLocation::Query, schema, options)
    }

    /// `ValidateHeaders`: validate the lowercase header map.
    ///
    /// # Errors
    ///
    /// See [`ValidationHook::new`].
    pub fn headers(schema: &Value, options: HookOptions) -> Result<Self, HookError> {
        Self::new(ParameterLocation::Header, schema, options)
    }

    /// Build a hook for `location` with default [`ValidationSettings`].
    ///
    /// # Errors
    ///
    /// * [`HookError::UnsupportedSchemaType`] - the schema's `type` is not `"object"`
    /// * [`HookError::InvalidSchema`] - the schema does not compile
    pub fn new(
        location: ParameterLocation,
        schema: &Value,
        options: HookOptions,
    ) -> Result<Self, HookError> {
        Self::with_settings(location, schema, options, ValidationSettings::default())
    }

    /// Build a hook for `location` with explicit settings.
    ///
    /// # Errors
    ///
    /// Same as [`ValidationHook::new`].
    pub fn with_settings(
        location: ParameterLocation,
        schema: &Value,
        options: HookOptions,
        settings: ValidationSettings,
    ) -> Result<Self, HookError> {
        Self::build(location, schema, options, settings, |hook| {
            let compiled = JsonSchemaValidator::compile(schema)
                .map_err(|reason| HookError::InvalidSchema { hook, reason })?;
            let compiled: Arc<dyn SchemaValidator> = Arc::new(compiled);
            Ok(compiled)
        })
    }

    /// Build a hook that delegates validation to a custom engine.
    ///
    /// # Errors
    ///
    /// * [`HookError::UnsupportedSchemaType`] - the schema's `type` is not `"object"`
    pub fn with_validator(
        location: ParameterLocation,
        schema: &Value,
        options: HookOptions,
        settings: ValidationSettings,
        validator: Arc<dyn SchemaValidator>,
    ) -> Result<Self, HookError> {
        Self::build(location, schema, options, settings, |_| Ok(validator))
    }

    /// The object-type check runs before `validator` is asked for an engine.
    fn build<F>(
        location: ParameterLocation,
        schema: &Value,
        options: HookOptions,
        settings: ValidationSettings,
        validator: F,
    ) -> Result<Self, HookError>
    where
        F: FnOnce(&'static str) -> Result<Arc<dyn SchemaValidator>, HookError>,
    {
        let hook = hook_name(location);
        ensure_object_schema(hook, schema)?;
        let validator = validator(hook)?;

        let api_parameters =
            (options.openapi == Some(true)).then(|| derive_api_parameters(location, schema));

        info!(
            hook = hook,
            openapi = api_parameters.is_some(),
            coerce_types = settings.coerce_types,
            all_errors = settings.all_errors,
            "Validation hook configured"
        );

        Ok(Self {
            location,
            schema: Arc::new(schema.clone()),
            validator,
            settings,
            api_parameters,
        })
    }

    /// Location of the validated field.
    #[must_use]
    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    /// Parameters this hook describes, if OpenAPI metadata was requested.
    #[must_use]
    pub fn api_parameters(&self) -> Option<&[ApiParameter]> {
        self.api_parameters.as_deref()
    }

    /// Request field name, also used as the key of the error body.
    fn field(&self) -> &'static str {
        match self.location {
            ParameterLocation::Cookie => "cookies",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "headers",
            ParameterLocation::Path => "pathParams",
        }
    }

    /// Value under validation; an unset field is validated as `null`.
    fn read_field<'a>(&self, ctx: &'a Context) -> Cow<'a, Value> {
        let field = match self.location {
            ParameterLocation::Cookie => ctx.request.cookies.as_ref(),
            ParameterLocation::Query => ctx.request.query.as_ref(),
            ParameterLocation::Header => {
                return Cow::Owned(string_map_to_value(&ctx.request.headers))
            }
            ParameterLocation::Path => return Cow::Owned(string_map_to_value(&ctx.request.params)),
        };
        field.map_or(Cow::Owned(Value::Null), Cow::Borrowed)
    }
}

impl Hook for ValidationHook {
    fn name(&self) -> &str {
        hook_name(self.location)
    }

    fn run(&self, ctx: &Context) -> Option<HttpResponse> {
        let raw = self.read_field(ctx);
        let result = if self.settings.coerce_types {
            self.validator.validate(&coerce_params(&raw, &self.schema))
        } else {
            self.validator.validate(&raw)
        };

        let mut errors = match result {
            Ok(()) => return None,
            Err(errors) => errors,
        };
        if !self.settings.all_errors {
            errors.truncate(1);
        }

        debug!(
            hook = self.name(),
            method = %ctx.request.method,
            path = %ctx.request.path,
            error_count = errors.len(),
            "Request rejected by validation hook"
        );
        let mut body = Map::new();
        body.insert(self.field().to_string(), json!(errors));
        Some(HttpResponse::bad_request(Value::Object(body)))
    }

    fn register_openapi(&self, metadata: &ApiMetadata, target: &Target) {
        if let Some(params) = &self.api_parameters {
            metadata.add_api_parameters(target, params);
        }
    }
}

fn hook_name(location: ParameterLocation) -> &'static str {
    match location {
        ParameterLocation::Cookie => "ValidateCookies",
        ParameterLocation::Query => "ValidateQuery",
        ParameterLocation::Header => "ValidateHeaders",
        ParameterLocation::Path => "ValidatePathParams",
    }
}

fn ensure_object_schema(hook: &'static str, schema: &Value) -> Result<(), HookError> {
    if schema.get("type").and_then(Value::as_str) == Some("object") {
        Ok(())
    } else {
        Err(HookError::UnsupportedSchemaType { hook })
    }
}
