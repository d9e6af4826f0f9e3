//! `arbor serve`: exposes a directory of structures over HTTP so that other
//! `arbor --server <url>` clients can edit them.
//!
//! Routing and storage live in [`arborapp::server`]; this module only moves
//! bytes between the listener and the router. Requests are served one at a
//! time.

use arborapp::error::{ArborError, Result};
use arborapp::server;
use arborapp::store::StorageBackend;
use serde_json::json;
use std::io::Read;
use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, warn};

pub(super) fn run<B: StorageBackend>(backend: B, listen: &str) -> Result<()> {
    let server = Server::http(listen)
        .map_err(|e| ArborError::Api(format!("Cannot listen on {}: {}", listen, e)))?;

    println!("Serving {} on http://{}", backend.location(), listen);
    println!("Press Ctrl+C to stop");

    for request in server.incoming_requests() {
        serve_one(&backend, request);
    }
    Ok(())
}

fn serve_one<B: StorageBackend>(backend: &B, mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = String::new();
    let response = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => server::handle(backend, &method, &url, &body),
        Err(e) => {
            warn!(%method, %url, error = %e, "unreadable request body");
            server::ServerResponse {
                status: 400,
                body: json!({ "error": format!("Unreadable body: {}", e) }).to_string(),
            }
        }
    };
    debug!(%method, %url, status = response.status, "responding");

    let mut reply = Response::from_string(response.body).with_status_code(response.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        reply = reply.with_header(header);
    }
    if let Err(e) = request.respond(reply) {
        warn!(%method, %url, error = %e, "failed to send response");
    }
}
