//! Router core module - hot path for request routing.

use http::Method;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::app::Route;

/// HTTP methods the router will mount; routes declared with any other method
/// are dropped at startup.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// Result of successfully matching a request to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Path parameters extracted from the URL (e.g., `:id` → `("id", "123")`)
    pub path_params: Vec<(String, String)>,
}

impl RouteMatch {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g., `/org/:id/user/:id`), returns the last
    /// occurrence.
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Path parameters as a map (last occurrence wins)
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params.iter().cloned().collect()
    }
}

/// Router that matches HTTP requests to routes using compiled regexes
#[derive(Clone)]
pub struct Router {
    routes: Vec<(Method, Regex, Arc<Route>, Vec<String>)>,
}

impl Router {
    /// Compile the route table.
    ///
    /// Routes with unsupported methods are skipped.
    #[must_use]
    pub fn new(routes: &[Arc<Route>]) -> Self {
        let mut compiled = Vec::with_capacity(routes.len());
        for route in routes {
            if !SUPPORTED_METHODS.contains(&route.method) {
                warn!(
                    method = %route.method,
                    path = %route.path,
                    "Skipping route with unsupported HTTP method"
                );
                continue;
            }
            match Self::path_to_regex(&route.path) {
                Ok((regex, param_names)) => {
                    compiled.push((route.method.clone(), regex, Arc::clone(route), param_names));
                }
                Err(e) => {
                    error!(
                        method = %route.method,
                        path = %route.path,
                        error = %e,
                        "Failed to compile route path"
                    );
                }
            }
        }

        let routes_summary: Vec<String> = compiled
            .iter()
            .take(10)
            .map(|(method, _, route, _)| format!("{} {}", method, route.path))
            .collect();
        info!(
            routes_count = compiled.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { routes: compiled }
    }

    /// Number of mounted routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match an HTTP request to a route
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - first route (in declaration order) whose method and path match
    /// * `None` - no route matches (results in 404)
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();

        for (route_method, regex, route, param_names) in &self.routes {
            if route_method != method {
                continue;
            }
            let Some(caps) = regex.captures(path) else {
                continue;
            };
            let path_params: Vec<(String, String)> = param_names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    caps.get(i + 1)
                        .map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect();

            let match_duration = match_start.elapsed();
            if match_duration > Duration::from_millis(1) {
                warn!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.path,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                info!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.path,
                    path_params = ?path_params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            return Some(RouteMatch {
                route: Arc::clone(route),
                path_params,
            });
        }

        warn!(
            method = %method,
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }

    /// Convert a route path to a regex and extract parameter names
    ///
    /// Transforms `/users/:id` or `/users/{id}` into `^/users/([^/]+)/?$` with
    /// parameter names `["id"]`. Static segments are matched literally.
    pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>), regex::Error> {
        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::new();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            pattern.push('/');
            if let Some(name) = param_name(segment) {
                pattern.push_str("([^/]+)");
                param_names.push(name.to_string());
            } else {
                pattern.push_str(&regex::escape(segment));
            }
        }

        if param_names.is_empty() && pattern.len() == 1 {
            pattern.push_str("/$");
        } else {
            pattern.push_str("/?$");
        }
        Ok((Regex::new(&pattern)?, param_names))
    }
}

fn param_name(segment: &str) -> Option<&str> {
    if let Some(name) = segment.strip_prefix(':') {
        return (!name.is_empty()).then_some(name);
    }
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}
