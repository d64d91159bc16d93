//! # OpenAPI Parameter Metadata
//!
//! Hooks that know the shape of a request input can describe it as OpenAPI
//! [parameter objects](https://spec.openapis.org/oas/v3.1.0#parameter-object).
//! Those descriptions are kept in an [`ApiMetadata`] side-table keyed by
//! [`Target`], i.e. a controller or one action of a controller, and are read
//! back later when an OpenAPI document is assembled.
//!
//! ## Registration Flow
//!
//! ```text
//! App::new(controllers)
//!   └─ for each controller hook ─▶ hook.register_openapi(&metadata, Target::controller(name))
//!   └─ for each action hook     ─▶ hook.register_openapi(&metadata, Target::action(name, action))
//! ```
//!
//! Lists attached to the same target are appended, so a cookie hook and a
//! query hook on one action end up in a single merged list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use tracing::debug;

/// Where a parameter lives in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

/// One OpenAPI parameter object.
///
/// `required` is either `Some(true)` or absent; it is never serialised as
/// `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    pub schema: Value,
}

/// Derive parameter objects from an object JSON Schema.
///
/// One parameter per entry of `schema.properties`, in the order the
/// properties were declared. A parameter is marked required only when its
/// name appears in `schema.required`.
#[must_use]
pub fn derive_api_parameters(location: ParameterLocation, schema: &Value) -> Vec<ApiParameter> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, sub_schema)| ApiParameter {
                    location,
                    name: name.clone(),
                    required: required.contains(&name.as_str()).then_some(true),
                    schema: sub_schema.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Something metadata can be attached to: a whole controller, or a single
/// action of a controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub controller: String,
    pub action: Option<String>,
}

impl Target {
    /// Controller-level target (applies to every action of the controller).
    #[must_use]
    pub fn controller(name: impl Into<String>) -> Self {
        Self {
            controller: name.into(),
            action: None,
        }
    }

    /// Action-level target.
    #[must_use]
    pub fn action(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: Some(action.into()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{}::{}", self.controller, action),
            None => write!(f, "{}", self.controller),
        }
    }
}

/// Side-table of OpenAPI parameter lists keyed by [`Target`].
///
/// Written during application setup, read when documentation is generated.
#[derive(Debug, Default)]
pub struct ApiMetadata {
    parameters: RwLock<HashMap<Target, Vec<ApiParameter>>>,
}

impl ApiMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append parameters to the list attached to `target`.
    pub fn add_api_parameters(&self, target: &Target, params: &[ApiParameter]) {
        let mut map = self
            .parameters
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let list = map.entry(target.clone()).or_default();
        list.extend(params.iter().cloned());
        debug!(
            target = %target,
            added = params.len(),
            total = list.len(),
            "OpenAPI parameters attached"
        );
    }

    /// Parameters attached to exactly `target`, or `None` if nothing was ever
    /// attached there.
    #[must_use]
    pub fn api_parameters(&self, target: &Target) -> Option<Vec<ApiParameter>> {
        self.parameters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(target)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "properties": {
                "foobar": { "type": "string" },
                "barfoo": { "type": "string" },
            },
            "required": ["barfoo"],
            "type": "object",
        })
    }

    #[test]
    fn test_derive_keeps_property_order() {
        let params = derive_api_parameters(ParameterLocation::Query, &schema());
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["foobar", "barfoo"]);
    }

    #[test]
    fn test_derive_marks_only_required_names() {
        let params = derive_api_parameters(ParameterLocation::Cookie, &schema());
        assert_eq!(params[0].required, None);
        assert_eq!(params[1].required, Some(true));
        assert!(params.iter().all(|p| p.location == ParameterLocation::Cookie));
    }

    #[test]
    fn test_derive_without_properties_is_empty() {
        let params = derive_api_parameters(ParameterLocation::Query, &json!({ "type": "object" }));
        assert!(params.is_empty());
    }

    #[test]
    fn test_serialization_omits_required_false() {
        let params = derive_api_parameters(ParameterLocation::Query, &schema());
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!([
                { "in": "query", "name": "foobar", "schema": { "type": "string" } },
                { "in": "query", "name": "barfoo", "required": true, "schema": { "type": "string" } },
            ])
        );
    }

    #[test]
    fn test_metadata_absent_until_attached() {
        let metadata = ApiMetadata::new();
        assert!(metadata.api_parameters(&Target::controller("Foobar")).is_none());
    }

    #[test]
    fn test_metadata_appends_for_same_target() {
        let metadata = ApiMetadata::new();
        let target = Target::action("Foobar", "foo");
        let query = derive_api_parameters(ParameterLocation::Query, &schema());
        let cookies = derive_api_parameters(ParameterLocation::Cookie, &schema());
        metadata.add_api_parameters(&target, &query);
        metadata.add_api_parameters(&target, &cookies);

        let merged = metadata.api_parameters(&target).unwrap();
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[0].location, ParameterLocation::Query);
        assert_eq!(merged[3].location, ParameterLocation::Cookie);
    }

    #[test]
    fn test_metadata_targets_are_scoped() {
        let metadata = ApiMetadata::new();
        let params = derive_api_parameters(ParameterLocation::Query, &schema());
        metadata.add_api_parameters(&Target::action("Foobar", "foo"), &params);

        assert!(metadata.api_parameters(&Target::controller("Foobar")).is_none());
        assert!(metadata.api_parameters(&Target::action("Foobar", "bar")).is_none());
        assert!(metadata.api_parameters(&Target::action("Foobar", "foo")).is_some());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::controller("Foobar").to_string(), "Foobar");
        assert_eq!(Target::action("Foobar", "foo").to_string(), "Foobar::foo");
    }
}
