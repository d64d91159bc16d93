use super::request::{parse_request, ParsedRequest};
use super::response::write_response;
use crate::app::App;
use crate::context::{multi_map_to_value, string_map_to_value, Context, Request};
use crate::response::HttpResponse;
use crate::router::Router;
use http::Method;
use may_minihttp::{HttpService, Request as RawRequest, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing::warn;

/// `may_minihttp` service serving an [`App`].
///
/// Cloned once per connection; the app and compiled router are shared.
#[derive(Clone)]
pub struct AppService {
    pub app: Arc<App>,
    pub router: Arc<Router>,
}

impl AppService {
    /// Mount `app`'s route table.
    #[must_use]
    pub fn new(app: Arc<App>) -> Self {
        let router = Router::new(app.routes());
        Self {
            app,
            router: Arc::new(router),
        }
    }

    /// Route and execute an already parsed request.
    ///
    /// This is the whole request pipeline minus socket I/O.
    #[must_use]
    pub fn respond(&self, parsed: ParsedRequest) -> HttpResponse {
        let ParsedRequest {
            method,
            path,
            headers,
            cookies,
            query_params,
            body,
        } = parsed;

        let route_match = method
            .parse::<Method>()
            .ok()
            .and_then(|m| self.router.route(&m, &path).map(|rm| (m, rm)));

        let Some((method, route_match)) = route_match else {
            if method == "GET" && path == "/health" {
                return health_response();
            }
            return HttpResponse::not_found(
                json!({ "error": "Not Found", "method": method, "path": path }),
            );
        };

        let ctx = Context::new(Request {
            method,
            path,
            headers,
            params: route_match.path_params_map(),
            query: Some(multi_map_to_value(&query_params)),
            cookies: Some(string_map_to_value(&cookies)),
            body,
        });

        let response = route_match.route.execute(&ctx);
        if response.is_server_error() {
            warn!(
                route = %route_match.route,
                status = response.status.as_u16(),
                "Handler returned server error"
            );
        }
        response
    }
}

/// Basic health check response returning `{ "status": "ok" }`.
#[must_use]
pub fn health_response() -> HttpResponse {
    HttpResponse::ok(json!({ "status": "ok" }))
}

impl HttpService for AppService {
    fn call(&mut self, req: RawRequest, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        write_response(res, self.respond(parsed));
        Ok(())
    }
}
