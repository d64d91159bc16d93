//! Contract tests for the cookie and query validation hooks.

use brrthooks::app::{Action, App, Controller};
use brrthooks::context::{Context, Request};
use brrthooks::hooks::{validate_cookies, validate_query, Hook, HookOptions, ValidationHook};
use brrthooks::openapi::{ApiParameter, ParameterLocation, Target};
use brrthooks::response::HttpResponse;
use http::{Method, StatusCode};
use serde_json::{json, Value};

type Ctor = fn(&Value, HookOptions) -> Result<ValidationHook, brrthooks::HookError>;

const HOOKS: [(&str, ParameterLocation, Ctor); 2] = [
    ("ValidateCookies", ParameterLocation::Cookie, validate_cookies),
    ("ValidateQuery", ParameterLocation::Query, validate_query),
];

fn foo_schema() -> Value {
    json!({
        "properties": { "foo": { "type": "integer" } },
        "type": "object",
    })
}

fn metadata_schema() -> Value {
    json!({
        "properties": {
            "barfoo": { "type": "string" },
            "foobar": { "type": "string" },
        },
        "required": ["barfoo"],
        "type": "object",
    })
}

/// Context whose cookies or query field is set to `value` (`None` leaves it unset).
fn ctx_for(location: ParameterLocation, value: Option<Value>) -> Context {
    let mut request = Request::new(Method::GET, "/");
    match location {
        ParameterLocation::Cookie => request.cookies = value,
        _ => request.query = value,
    }
    Context::new(request)
}

#[test]
fn test_schema_without_object_type_is_rejected() {
    for (name, _, ctor) in HOOKS {
        let err = ctor(&json!({ "properties": {} }), HookOptions::default())
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            format!("{name} only accepts a schema of type \"object\".")
        );
    }
}

#[test]
fn test_valid_value_passes_through() {
    for (_, location, ctor) in HOOKS {
        let hook = ctor(&foo_schema(), HookOptions::default()).unwrap();
        assert!(hook.run(&ctx_for(location, Some(json!({ "foo": 3 })))).is_none());
    }
}

#[test]
fn test_invalid_values_return_bad_request() {
    let invalid = [
        Some(Value::Null),
        None,
        Some(json!("foo")),
        Some(json!(3)),
        Some(json!(true)),
        Some(json!({ "foo": "a" })),
    ];
    for (name, location, ctor) in HOOKS {
        let hook = ctor(&foo_schema(), HookOptions::default()).unwrap();
        for value in &invalid {
            let response = hook
                .run(&ctx_for(location, value.clone()))
                .unwrap_or_else(|| panic!("{name} accepted {value:?}"));
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert!(!response.body.is_null());
        }
    }
}

#[test]
fn test_error_body_is_keyed_by_field() {
    let hook = validate_query(&foo_schema(), HookOptions::default()).unwrap();
    let response = hook
        .run(&ctx_for(ParameterLocation::Query, Some(json!({ "foo": "a" }))))
        .unwrap();
    let errors = response.body["query"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["instancePath"], "/foo");

    let hook = validate_cookies(&foo_schema(), HookOptions::default()).unwrap();
    let response = hook.run(&ctx_for(ParameterLocation::Cookie, None)).unwrap();
    assert!(response.body["cookies"].is_array());
}

fn expected_parameters(location: ParameterLocation) -> Value {
    json!([
        { "in": location.to_string(), "name": "barfoo", "required": true, "schema": { "type": "string" } },
        { "in": location.to_string(), "name": "foobar", "schema": { "type": "string" } },
    ])
}

fn controller_level_app(hook: ValidationHook) -> App {
    App::new(vec![Controller::new("FooController")
        .hook(hook)
        .action(Action::get("/foo", "foo", |_ctx| HttpResponse::ok("Success")))])
}

fn action_level_app(hook: ValidationHook) -> App {
    App::new(vec![Controller::new("FooController")
        .action(Action::get("/foo", "foo", |_ctx| HttpResponse::ok("Success")).hook(hook))])
}

fn as_json(params: Option<Vec<ApiParameter>>) -> Option<Value> {
    params.map(|p| serde_json::to_value(p).unwrap())
}

#[test]
fn test_no_openapi_metadata_unless_requested() {
    for (_, _, ctor) in HOOKS {
        for options in [HookOptions::default(), HookOptions { openapi: Some(false) }] {
            let app = controller_level_app(ctor(&metadata_schema(), options).unwrap());
            assert!(app
                .metadata()
                .api_parameters(&Target::controller("FooController"))
                .is_none());

            let app = action_level_app(ctor(&metadata_schema(), options).unwrap());
            assert!(app
                .metadata()
                .api_parameters(&Target::action("FooController", "foo"))
                .is_none());
        }
    }
}

#[test]
fn test_openapi_metadata_on_controller() {
    for (_, location, ctor) in HOOKS {
        let app = controller_level_app(ctor(&metadata_schema(), HookOptions::openapi()).unwrap());
        let params = app
            .metadata()
            .api_parameters(&Target::controller("FooController"));
        assert_eq!(as_json(params), Some(expected_parameters(location)));
        assert!(app
            .metadata()
            .api_parameters(&Target::action("FooController", "foo"))
            .is_none());
    }
}

#[test]
fn test_openapi_metadata_on_action() {
    for (_, location, ctor) in HOOKS {
        let app = action_level_app(ctor(&metadata_schema(), HookOptions::openapi()).unwrap());
        let params = app
            .metadata()
            .api_parameters(&Target::action("FooController", "foo"));
        assert_eq!(as_json(params), Some(expected_parameters(location)));
        assert!(app
            .metadata()
            .api_parameters(&Target::controller("FooController"))
            .is_none());
    }
}
