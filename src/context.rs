//! # Request Context
//!
//! [`Context`] is the per-request object handed to hooks and handlers. It is
//! built by the server adapter from the parsed HTTP request and is read-only
//! for the rest of the pipeline.
//!
//! Cookies and query parameters are kept as raw JSON values rather than typed
//! maps: a hook must be able to see a missing (`None`), `null` or otherwise
//! malformed field and reject it instead of failing to construct the context.

use http::Method;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Parsed request data visible to hooks and handlers.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Path parameters extracted by the router (e.g. `:id` → `"12"`)
    pub params: HashMap<String, String>,
    /// Query string parameters; `None` when the field was never populated
    pub query: Option<Value>,
    /// Cookies from the `Cookie` header; `None` when the field was never populated
    pub cookies: Option<Value>,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            headers: HashMap::new(),
            params: HashMap::new(),
            query: None,
            cookies: None,
            body: None,
        }
    }
}

impl Request {
    /// Create a request for the given method and path with no other data.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the query field to an arbitrary JSON value.
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the cookies field to an arbitrary JSON value.
    #[must_use]
    pub fn with_cookies(mut self, cookies: Value) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a path parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Per-request context passed through the hook chain to the handler.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub request: Request,
}

impl Context {
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self { request }
    }
}

/// Convert a string map (as produced by cookie/query parsing) into a JSON object.
#[must_use]
pub fn string_map_to_value(map: &HashMap<String, String>) -> Value {
    let object: Map<String, Value> = map
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(object)
}

/// Convert a multi-valued map (as produced by query parsing) into a JSON object.
///
/// A key with one value maps to that string; a repeated key maps to an array
/// of its strings in request order.
#[must_use]
pub fn multi_map_to_value(map: &HashMap<String, Vec<String>>) -> Value {
    let object: Map<String, Value> = map
        .iter()
        .map(|(k, values)| {
            let value = match values.as_slice() {
                [single] => Value::String(single.clone()),
                many => Value::Array(many.iter().cloned().map(Value::String).collect()),
            };
            (k.clone(), value)
        })
        .collect();
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_request_has_undefined_fields() {
        let ctx = Context::default();
        assert!(ctx.request.query.is_none());
        assert!(ctx.request.cookies.is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut req = Request::new(Method::GET, "/");
        req.headers
            .insert("content-type".to_string(), "application/json".to_string());
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_string_map_to_value() {
        let mut map = HashMap::new();
        map.insert("foo".to_string(), "3".to_string());
        assert_eq!(string_map_to_value(&map), json!({ "foo": "3" }));
    }

    #[test]
    fn test_multi_map_to_value() {
        let mut map = HashMap::new();
        map.insert("foo".to_string(), vec!["3".to_string()]);
        map.insert("tag".to_string(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            multi_map_to_value(&map),
            json!({ "foo": "3", "tag": ["a", "b"] })
        );
    }
}
