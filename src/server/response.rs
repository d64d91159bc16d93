use may_minihttp::Response;
use serde_json::Value;

use crate::response::HttpResponse;

fn status_reason(status: http::StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Write a framework response onto the wire.
///
/// String bodies are written verbatim as `text/plain`, `null` bodies as an
/// empty payload, everything else as JSON.
pub fn write_response(res: &mut Response, response: HttpResponse) {
    let HttpResponse { status, body } = response;
    res.status_code(usize::from(status.as_u16()), status_reason(status));
    match body {
        Value::String(s) => {
            res.header("Content-Type: text/plain");
            res.body_vec(s.into_bytes());
        }
        Value::Null => {}
        other => {
            res.header("Content-Type: application/json");
            res.body_vec(other.to_string().into_bytes());
        }
    }
}
