use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

/// Parsed HTTP request data used by `AppService`.
///
/// Contains all extracted information from the raw HTTP request including
/// headers, cookies, query parameters, and JSON body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed cookies from Cookie header
    pub cookies: HashMap<String, String>,
    /// Parsed query string parameters; a repeated key keeps every value in order
    pub query_params: HashMap<String, Vec<String>>,
    /// Parsed JSON body (if the body is valid JSON)
    pub body: Option<serde_json::Value>,
}

impl ParsedRequest {
    /// Build a request from a method and a raw target such as `/users?limit=10`.
    ///
    /// Splits off the query string the same way [`parse_request`] does.
    #[must_use]
    pub fn from_target(method: &str, target: &str) -> Self {
        Self {
            method: method.to_string(),
            path: target.split('?').next().unwrap_or("/").to_string(),
            query_params: parse_query_params(target),
            ..Self::default()
        }
    }

    /// Add a header (name is lowercased); a `cookie` header also refreshes
    /// the parsed cookies.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self.cookies = parse_cookies(&self.headers);
        self
    }
}

/// Parse the `Cookie` header into name/value pairs.
#[must_use]
pub fn parse_cookies(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .get("cookie")
        .map(|c| {
            c.split(';')
                .filter_map(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    let name = parts.next()?.trim().to_string();
                    if name.is_empty() {
                        return None;
                    }
                    let value = parts.next().unwrap_or("").trim().to_string();
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter names
/// and values. `?tag=a&tag=b` yields `tag -> ["a", "b"]`.
#[must_use]
pub fn parse_query_params(path: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.entry(k.into_owned()).or_default().push(v.into_owned());
        }
    }
    params
}

/// Parse an incoming HTTP request into a ParsedRequest
///
/// Extracts all components (method, path, headers, cookies, query params, body)
/// from the raw HTTP request.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();
    debug!(header_count = headers.len(), "Headers extracted");

    let cookies = parse_cookies(&headers);
    debug!(
        cookie_count = cookies.len(),
        cookie_names = ?cookies.keys().collect::<Vec<_>>(),
        "Cookies extracted"
    );

    let query_params = parse_query_params(&raw_path);
    debug!(
        param_count = query_params.len(),
        query_params = ?query_params,
        "Query params parsed"
    );

    let body = {
        let mut body_str = String::new();
        match req.body().read_to_string(&mut body_str) {
            Ok(size) if size > 0 => {
                let parsed = serde_json::from_str::<serde_json::Value>(&body_str);
                debug!(
                    body_size_bytes = size,
                    json = parsed.is_ok(),
                    "Request body read"
                );
                parsed.ok()
            }
            _ => None,
        }
    };

    info!(
        method = %method,
        path = %path,
        headers_count = headers.len(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        cookies,
        query_params,
        body,
    }
}
