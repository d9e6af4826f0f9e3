//! # Structure Server
//!
//! Request routing for the storage protocol that [`HttpBackend`] speaks,
//! served over any [`StorageBackend`]:
//!
//! | Method   | Path           | Success body                      |
//! |----------|----------------|-----------------------------------|
//! | `GET`    | `/list`        | `["a.json", ...]`                 |
//! | `GET`    | `/tree`        | default structure (`[]` if absent)|
//! | `POST`   | `/tree`        | `{"ok": true}`                    |
//! | `GET`    | `/tree/{name}` | the document (`[]` if absent)     |
//! | `POST`   | `/tree/{name}` | `{"ok": true}`                    |
//! | `DELETE` | `/tree/{name}` | `{"deleted": true}`               |
//!
//! Storage failures answer `500 {"error": "..."}`, malformed requests `400`.
//! `/tree` without a name addresses [`DEFAULT_STRUCTURE`].
//!
//! The router is transport-free: [`handle`] maps a method, URL and body to a
//! [`ServerResponse`]. The CLI's `serve` command feeds it from an HTTP
//! listener.
//!
//! [`HttpBackend`]: crate::store::http_backend::HttpBackend

use crate::error::ArborError;
use crate::store::{self, StorageBackend, DEFAULT_STRUCTURE};
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: u16,
    /// Always JSON.
    pub body: String,
}

impl ServerResponse {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            body: value.to_string(),
        }
    }

    fn error(status: u16, message: impl std::fmt::Display) -> Self {
        Self::json(status, json!({ "error": message.to_string() }))
    }
}

pub fn handle<B: StorageBackend>(
    backend: &B,
    method: &str,
    url: &str,
    body: &str,
) -> ServerResponse {
    let path = url.split('?').next().unwrap_or("");
    let decoded = match decode_segments(path) {
        Ok(decoded) => decoded,
        Err(response) => {
            info!(method, path, status = response.status, "request");
            return response;
        }
    };
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    let response = match (method, segments.as_slice()) {
        ("GET", ["list"]) => list(backend),
        ("GET", ["tree"]) => read(backend, DEFAULT_STRUCTURE),
        ("POST", ["tree"]) => write(backend, DEFAULT_STRUCTURE, body),
        ("GET", ["tree", name]) => read(backend, name),
        ("POST", ["tree", name]) => write(backend, name, body),
        ("DELETE", ["tree", name]) => remove(backend, name),
        (_, ["list"]) | (_, ["tree"]) | (_, ["tree", _]) => {
            ServerResponse::error(405, "Method not allowed")
        }
        _ => ServerResponse::error(404, "Not found"),
    };

    if response.status >= 500 {
        warn!(method, path, status = response.status, body = %response.body, "request failed");
    } else {
        info!(method, path, status = response.status, "request");
    }
    response
}

/// Splits the path and percent-decodes each segment, so a client asking for
/// `/tree/a%C3%B1o.json` addresses the structure `año.json`.
fn decode_segments(path: &str) -> Result<Vec<String>, ServerResponse> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .map_err(|_| ServerResponse::error(400, "Path is not valid UTF-8"))
        })
        .collect()
}

fn storage_failure(e: ArborError) -> ServerResponse {
    match e {
        ArborError::Validation(_) => ServerResponse::error(400, e),
        other => ServerResponse::error(500, other),
    }
}

fn list<B: StorageBackend>(backend: &B) -> ServerResponse {
    match backend.list() {
        Ok(names) => ServerResponse::json(200, json!(names)),
        Err(e) => storage_failure(e),
    }
}

fn read<B: StorageBackend>(backend: &B, raw_name: &str) -> ServerResponse {
    let name = match store::normalize_name(raw_name) {
        Ok(n) => n,
        Err(e) => return storage_failure(e),
    };
    match backend.read(&name) {
        Ok(None) => ServerResponse::ok("[]".to_string()),
        Ok(Some(text)) => match serde_json::from_str::<Value>(&text) {
            Ok(value) => ServerResponse::json(200, value),
            Err(e) => ServerResponse::error(500, format!("Stored document is corrupt: {}", e)),
        },
        Err(e) => storage_failure(e),
    }
}

fn write<B: StorageBackend>(backend: &B, raw_name: &str, body: &str) -> ServerResponse {
    let name = match store::normalize_name(raw_name) {
        Ok(n) => n,
        Err(e) => return storage_failure(e),
    };
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return ServerResponse::error(400, format!("Invalid JSON body: {}", e)),
    };
    let pretty = match serde_json::to_string_pretty(&value) {
        Ok(p) => p,
        Err(e) => return ServerResponse::error(500, e),
    };
    match backend.write(&name, &pretty) {
        Ok(()) => ServerResponse::json(200, json!({ "ok": true })),
        Err(e) => storage_failure(e),
    }
}

fn remove<B: StorageBackend>(backend: &B, raw_name: &str) -> ServerResponse {
    let name = match store::normalize_name(raw_name) {
        Ok(n) => n,
        Err(e) => return storage_failure(e),
    };
    match backend.remove(&name) {
        Ok(()) => ServerResponse::json(200, json!({ "deleted": true })),
        Err(e) => storage_failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn body(resp: &ServerResponse) -> Value {
        serde_json::from_str(&resp.body).unwrap()
    }

    #[test]
    fn missing_document_reads_as_empty_array() {
        let backend = MemBackend::new();
        let resp = handle(&backend, "GET", "/tree/nothing.json", "");
        assert_eq!(resp.status, 200);
        assert_eq!(body(&resp), json!([]));
    }

    #[test]
    fn save_then_read_named_structure() {
        let backend = MemBackend::new();
        let doc = r#"[{"id":"a","name":"Docs","children":[],"collapsed":false,"reviewed":false}]"#;

        let resp = handle(&backend, "POST", "/tree/plan.json", doc);
        assert_eq!(resp.status, 200);
        assert_eq!(body(&resp), json!({ "ok": true }));

        let resp = handle(&backend, "GET", "/tree/plan.json", "");
        assert_eq!(body(&resp)[0]["name"], "Docs");

        let resp = handle(&backend, "GET", "/list", "");
        assert_eq!(body(&resp), json!(["plan.json"]));
    }

    #[test]
    fn bare_tree_is_default_structure() {
        let backend = MemBackend::new();
        handle(&backend, "POST", "/tree", "[]");
        assert!(backend.document(DEFAULT_STRUCTURE).is_some());
        assert_eq!(handle(&backend, "GET", "/tree", "").status, 200);
    }

    #[test]
    fn delete_answers_deleted_even_when_missing() {
        let backend = MemBackend::new();
        handle(&backend, "POST", "/tree/x.json", "[]");
        let resp = handle(&backend, "DELETE", "/tree/x.json", "");
        assert_eq!(body(&resp), json!({ "deleted": true }));
        let resp = handle(&backend, "DELETE", "/tree/x.json", "");
        assert_eq!(resp.status, 200);
        assert!(backend.list().unwrap().is_empty());
    }

    #[test]
    fn write_failure_is_500_with_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let resp = handle(&backend, "POST", "/tree/x.json", "[]");
        assert_eq!(resp.status, 500);
        assert!(body(&resp)["error"].is_string());
    }

    #[test]
    fn bad_requests() {
        let backend = MemBackend::new();
        assert_eq!(handle(&backend, "POST", "/tree/x.json", "{nope").status, 400);
        assert_eq!(handle(&backend, "GET", "/tree/..", "").status, 400);
        assert_eq!(handle(&backend, "PUT", "/tree/x.json", "").status, 405);
        assert_eq!(handle(&backend, "GET", "/elsewhere", "").status, 404);
    }

    #[test]
    fn percent_encoded_names_are_decoded() {
        let backend = MemBackend::new();
        let resp = handle(&backend, "POST", "/tree/a%C3%B1o.json", "[]");
        assert_eq!(resp.status, 200);
        assert!(backend.document("año.json").is_some());

        let resp = handle(&backend, "GET", "/list", "");
        assert_eq!(body(&resp), json!(["año.json"]));

        assert_eq!(handle(&backend, "GET", "/tree/a%C3%B1o", "").status, 200);
        let resp = handle(&backend, "DELETE", "/tree/a%C3%B1o.json", "");
        assert_eq!(body(&resp), json!({ "deleted": true }));
        assert!(backend.document("año.json").is_none());
    }

    #[test]
    fn encoded_path_separators_stay_rejected() {
        let backend = MemBackend::new();
        assert_eq!(handle(&backend, "GET", "/tree/..%2Fsecret", "").status, 400);
        assert_eq!(handle(&backend, "GET", "/tree/%FF", "").status, 400);
    }

    #[test]
    fn corrupt_document_is_500() {
        let backend = MemBackend::new();
        backend.write("bad.json", "{oops").unwrap();
        assert_eq!(handle(&backend, "GET", "/tree/bad.json", "").status, 500);
    }
}
