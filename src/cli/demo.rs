//! Demo catalogue app served by `brrthooks serve`.

use http::Method;
use serde_json::{json, Value};

use crate::app::{Action, App, Controller};
use crate::context::Context;
use crate::hooks::{HookError, HookOptions, ValidationHook};
use crate::openapi::ParameterLocation;
use crate::response::HttpResponse;
use crate::validator::ValidationSettings;

fn products() -> Value {
    json!([
        { "id": "1", "name": "Keyboard", "price": 49 },
        { "id": "2", "name": "Mouse", "price": 19 },
        { "id": "3", "name": "Monitor", "price": 199 },
    ])
}

fn list_products(ctx: &Context) -> HttpResponse {
    let all = products();
    let filter = ctx
        .request
        .query
        .as_ref()
        .and_then(|q| q.get("q"))
        .and_then(Value::as_str)
        .map(str::to_lowercase);
    let Some(filter) = filter else {
        return HttpResponse::ok(all);
    };
    let matching: Vec<Value> = all
        .as_array()
        .into_iter()
        .flatten()
        .filter(|p| {
            p.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase().contains(&filter))
        })
        .cloned()
        .collect();
    HttpResponse::ok(matching)
}

fn get_product(ctx: &Context) -> HttpResponse {
    let id = ctx.request.param("id").unwrap_or_default();
    products()
        .as_array()
        .and_then(|list| list.iter().find(|p| p.get("id").and_then(Value::as_str) == Some(id)))
        .cloned()
        .map_or_else(
            || HttpResponse::not_found(json!({ "error": "Product not found", "id": id })),
            HttpResponse::ok,
        )
}

/// Build the catalogue: a `ProductController` guarded by `ValidateCookies`,
/// with a `ValidateQuery` hook on its `list` action. Both hooks publish their
/// OpenAPI parameters.
///
/// # Errors
///
/// Returns an error if one of the demo schemas is rejected.
pub fn catalogue_app(settings: ValidationSettings) -> Result<App, HookError> {
    let cookies = ValidationHook::with_settings(
        ParameterLocation::Cookie,
        &json!({
            "type": "object",
            "properties": {
                "currency": { "type": "string", "enum": ["EUR", "USD"] }
            }
        }),
        HookOptions::openapi(),
        settings,
    )?;

    let query = ValidationHook::with_settings(
        ParameterLocation::Query,
        &json!({
            "type": "object",
            "properties": {
                "q": { "type": "string", "minLength": 1 },
                "limit": { "type": "string", "pattern": "^[0-9]+$" }
            },
            "additionalProperties": false
        }),
        HookOptions::openapi(),
        settings,
    )?;

    let controller = Controller::new("ProductController")
        .path("/products")
        .hook(cookies)
        .action(Action::get("/", "list", list_products).hook(query))
        .action(Action::get("/:id", "get", get_product))
        .action(Action::new(Method::DELETE, "/:id", "delete", |_ctx| {
            HttpResponse::method_not_allowed(json!({ "error": "Catalogue is read-only" }))
        }));

    Ok(App::new(vec![controller]))
}
