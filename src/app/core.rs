use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::controller::{Controller, Handler};
use crate::context::Context;
use crate::hooks::Hook;
use crate::openapi::{ApiMetadata, ApiParameter, Target};
use crate::response::HttpResponse;

/// One entry of the flattened route table.
pub struct Route {
    pub method: Method,
    /// Full path including every controller prefix (e.g. `/api/products/:id`)
    pub path: String,
    /// Controller keys from the outermost to the one declaring the action.
    ///
    /// A key is the controller's name; the n-th repeated occurrence of a name
    /// in the same app is keyed `Name#n` so its metadata stays separate.
    pub controllers: Vec<String>,
    /// Action name within its controller
    pub action: String,
    /// Hooks in execution order
    pub hooks: Vec<Arc<dyn Hook>>,
    pub handler: Handler,
}

impl Route {
    /// Key of the controller declaring this route's action.
    #[must_use]
    pub fn controller(&self) -> &str {
        self.controllers.last().map(String::as_str).unwrap_or_default()
    }

    /// Run the hook chain, then the handler.
    ///
    /// The first hook returning a response ends the pipeline and its response
    /// is returned as is.
    pub fn execute(&self, ctx: &Context) -> HttpResponse {
        for hook in &self.hooks {
            if let Some(response) = hook.run(ctx) {
                debug!(
                    route = %self,
                    hook = hook.name(),
                    status = response.status.as_u16(),
                    "Hook short-circuited request"
                );
                return response;
            }
        }
        (self.handler)(ctx)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}::{}",
            self.method,
            self.path,
            self.controller(),
            self.action
        )
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("controllers", &self.controllers)
            .field("action", &self.action)
            .field("hooks", &self.hooks.iter().map(|h| h.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Flattened route table plus the OpenAPI metadata registered by its hooks.
pub struct App {
    routes: Vec<Arc<Route>>,
    metadata: ApiMetadata,
}

impl App {
    /// Flatten `controllers` into a route table.
    ///
    /// Every hook registers its OpenAPI metadata once per mounted occurrence:
    /// controller hooks on the controller's [`Target`], action hooks on the
    /// action's [`Target`]. Targets use the keys described on
    /// [`Route::controllers`], so two controllers sharing a name (including
    /// every [`attach_handler`](super::attach_handler) controller) never see
    /// each other's parameters.
    #[must_use]
    pub fn new(controllers: Vec<Controller>) -> Self {
        let mut builder = RouteTableBuilder {
            metadata: ApiMetadata::new(),
            seen: HashMap::new(),
            routes: Vec::new(),
        };
        for controller in &controllers {
            builder.collect(controller, "", &[], &[]);
        }
        let RouteTableBuilder {
            metadata, routes, ..
        } = builder;

        let routes_summary: Vec<String> = routes.iter().take(10).map(|r| r.to_string()).collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Route table built"
        );

        Self { routes, metadata }
    }

    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    #[must_use]
    pub fn metadata(&self) -> &ApiMetadata {
        &self.metadata
    }

    /// All OpenAPI parameters that apply to `route`: every enclosing
    /// controller's list (outermost first), then the action's own list.
    #[must_use]
    pub fn api_parameters_for(&self, route: &Route) -> Vec<ApiParameter> {
        let mut params = Vec::new();
        for controller in &route.controllers {
            if let Some(list) = self.metadata.api_parameters(&Target::controller(controller)) {
                params.extend(list);
            }
        }
        if let Some(list) = self
            .metadata
            .api_parameters(&Target::action(route.controller(), &route.action))
        {
            params.extend(list);
        }
        params
    }
}

struct RouteTableBuilder {
    metadata: ApiMetadata,
    /// Occurrences of each controller name mounted so far
    seen: HashMap<String, usize>,
    routes: Vec<Arc<Route>>,
}

impl RouteTableBuilder {
    fn controller_key(&mut self, name: &str) -> String {
        let count = self.seen.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            return name.to_string();
        }
        let key = format!("{name}#{count}");
        warn!(
            controller = name,
            key = %key,
            "Controller name mounted more than once; metadata keyed separately"
        );
        key
    }

    fn collect(
        &mut self,
        controller: &Controller,
        prefix: &str,
        parent_chain: &[String],
        parent_hooks: &[Arc<dyn Hook>],
    ) {
        let prefix = join_paths(prefix, &controller.path);
        let key = self.controller_key(&controller.name);

        let mut chain = parent_chain.to_vec();
        chain.push(key.clone());

        let controller_target = Target::controller(&key);
        for hook in &controller.hooks {
            hook.register_openapi(&self.metadata, &controller_target);
        }
        let mut hooks = parent_hooks.to_vec();
        hooks.extend(controller.hooks.iter().cloned());

        for action in &controller.actions {
            let action_target = Target::action(&key, &action.name);
            for hook in &action.hooks {
                hook.register_openapi(&self.metadata, &action_target);
            }
            let mut route_hooks = hooks.clone();
            route_hooks.extend(action.hooks.iter().cloned());

            self.routes.push(Arc::new(Route {
                method: action.method.clone(),
                path: join_paths(&prefix, &action.path),
                controllers: chain.clone(),
                action: action.name.clone(),
                hooks: route_hooks,
                handler: Arc::clone(&action.handler),
            }));
        }

        for child in &controller.children {
            self.collect(child, &prefix, &chain, &hooks);
        }
    }
}

/// Join path fragments, collapsing duplicate and trailing slashes.
///
/// ```rust
/// use brrthooks::app::join_paths;
///
/// assert_eq!(join_paths("/api/", "/products/"), "/api/products");
/// assert_eq!(join_paths("", "/"), "/");
/// ```
#[must_use]
pub fn join_paths(prefix: &str, path: &str) -> String {
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(path.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{attach_handler, Action};
    use crate::context::Request;
    use crate::hooks::{validate_cookies, validate_query, HookOptions};
    use crate::openapi::ParameterLocation;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": { "foo": { "type": "integer" } },
            "required": ["foo"]
        })
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("", ""), "/");
        assert_eq!(join_paths("/foo", "bar"), "/foo/bar");
        assert_eq!(join_paths("/foo//", "/:id/"), "/foo/:id");
    }

    #[test]
    fn test_nested_controllers_prefix_paths_and_stack_hooks() {
        let inner = Controller::new("ItemController")
            .path("/items")
            .hook(validate_cookies(&schema(), HookOptions::default()).unwrap())
            .action(
                Action::get("/:id", "get", |_ctx| HttpResponse::ok("item"))
                    .hook(validate_query(&schema(), HookOptions::default()).unwrap()),
            );
        let outer = Controller::new("ApiController")
            .path("/api")
            .hook(validate_query(&schema(), HookOptions::default()).unwrap())
            .subcontroller(inner);

        let app = App::new(vec![outer]);
        let route = &app.routes()[0];
        assert_eq!(route.path, "/api/items/:id");
        assert_eq!(route.controllers, vec!["ApiController", "ItemController"]);
        let names: Vec<&str> = route.hooks.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["ValidateQuery", "ValidateCookies", "ValidateQuery"]);
    }

    #[test]
    fn test_execute_runs_handler_when_hooks_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = App::new(vec![Controller::new("C").action(
            Action::get("/", "index", move |_ctx| {
                counter.fetch_add(1, Ordering::SeqCst);
                HttpResponse::ok("Success")
            })
            .hook(validate_query(&schema(), HookOptions::default()).unwrap()),
        )]);
        let route = &app.routes()[0];

        let ok = Context::new(Request::new(Method::GET, "/").with_query(json!({ "foo": 3 })));
        assert_eq!(route.execute(&ok), HttpResponse::ok("Success"));

        let bad = Context::new(Request::new(Method::GET, "/").with_query(json!({ "foo": "3" })));
        assert!(route.execute(&bad).is_client_error());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_metadata_registered_per_target() {
        let app = App::new(vec![Controller::new("Foobar")
            .hook(validate_cookies(&schema(), HookOptions::openapi()).unwrap())
            .action(
                Action::get("/foo", "foo", |_ctx| HttpResponse::ok("foo"))
                    .hook(validate_query(&schema(), HookOptions::openapi()).unwrap()),
            )
            .action(Action::get("/bar", "bar", |_ctx| HttpResponse::ok("bar")))]);

        let metadata = app.metadata();
        let class_level = metadata.api_parameters(&Target::controller("Foobar")).unwrap();
        assert_eq!(class_level[0].location, ParameterLocation::Cookie);
        let foo = metadata.api_parameters(&Target::action("Foobar", "foo")).unwrap();
        assert_eq!(foo.len(), 1);
        assert_eq!(foo[0].location, ParameterLocation::Query);
        assert!(metadata.api_parameters(&Target::action("Foobar", "bar")).is_none());

        let merged = app.api_parameters_for(&app.routes()[0]);
        let locations: Vec<ParameterLocation> = merged.iter().map(|p| p.location).collect();
        assert_eq!(locations, vec![ParameterLocation::Cookie, ParameterLocation::Query]);
        assert_eq!(app.api_parameters_for(&app.routes()[1]).len(), 1);
    }

    #[test]
    fn test_attach_handler() {
        let app = App::new(vec![attach_handler(Method::PUT, "/foo/bar", |_ctx| {
            HttpResponse::ok("Success")
        })]);
        assert_eq!(app.routes()[0].to_string(), "PUT /foo/bar -> AnonymousController::handler");
    }

    #[test]
    fn test_attached_handlers_keep_their_own_parameters() {
        let query = json!({ "type": "object", "properties": { "a": { "type": "string" } } });
        let cookies = json!({ "type": "object", "properties": { "b": { "type": "string" } } });
        let app = App::new(vec![
            attach_handler(Method::GET, "/one", |_ctx| HttpResponse::ok("one"))
                .hook(validate_query(&query, HookOptions::openapi()).unwrap()),
            attach_handler(Method::GET, "/two", |_ctx| HttpResponse::ok("two"))
                .hook(validate_cookies(&cookies, HookOptions::openapi()).unwrap()),
        ]);

        let one = app.api_parameters_for(&app.routes()[0]);
        assert_eq!(one.len(), 1);
        assert_eq!((one[0].location, one[0].name.as_str()), (ParameterLocation::Query, "a"));

        let two = app.api_parameters_for(&app.routes()[1]);
        assert_eq!(two.len(), 1);
        assert_eq!((two[0].location, two[0].name.as_str()), (ParameterLocation::Cookie, "b"));
        assert_eq!(app.routes()[1].controller(), "AnonymousController#2");
    }

    #[test]
    fn test_controller_mounted_twice_registers_once_per_mount() {
        let products = Controller::new("ProductController")
            .hook(validate_query(&schema(), HookOptions::openapi()).unwrap())
            .action(Action::get("/", "list", |_ctx| HttpResponse::ok("list")));
        let app = App::new(vec![
            products.clone().path("/v1/products"),
            products.path("/v2/products"),
        ]);

        for route in app.routes() {
            assert_eq!(app.api_parameters_for(route).len(), 1, "{route}");
        }
        let first = app
            .metadata()
            .api_parameters(&Target::controller("ProductController"))
            .unwrap();
        assert_eq!(first.len(), 1);
    }
}
