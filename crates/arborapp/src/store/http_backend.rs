//! Client side of the structure server protocol:
//!
//! | Request                | Meaning                        |
//! |------------------------|--------------------------------|
//! | `GET /tree/{name}`     | document body (`[]` if absent) |
//! | `POST /tree/{name}`    | replace document               |
//! | `DELETE /tree/{name}`  | delete document                |
//! | `GET /list`            | JSON array of names            |
//!
//! Failures come back as a non-2xx status, usually with `{"error": "..."}`.

use super::backend::StorageBackend;
use crate::error::{ArborError, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

pub struct HttpBackend {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn tree_url(&self, name: &str) -> String {
        format!("{}/tree/{}", self.base_url, urlencoding::encode(name))
    }

    fn check(&self, action: &str, resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(ArborError::Storage(format!(
            "{} failed ({}): {}",
            action, status, detail
        )))
    }
}

fn transport(e: reqwest::Error) -> ArborError {
    ArborError::Storage(format!("Server unreachable: {}", e))
}

impl StorageBackend for HttpBackend {
    fn read(&self, name: &str) -> Result<Option<String>> {
        let url = self.tree_url(name);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send().map_err(transport)?;
        let resp = self.check("Load", resp)?;
        // The server answers `[]` for documents it does not have.
        Ok(Some(resp.text().map_err(transport)?))
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        let url = self.tree_url(name);
        debug!(%url, bytes = content.len(), "POST");
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(content.to_string())
            .send()
            .map_err(transport)?;
        self.check("Save", resp)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let url = self.tree_url(name);
        debug!(%url, "DELETE");
        let resp = self.client.delete(&url).send().map_err(transport)?;
        self.check("Delete", resp)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let url = format!("{}/list", self.base_url);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send().map_err(transport)?;
        let mut names: Vec<String> = self.check("List", resp)?.json().map_err(transport)?;
        names.sort();
        Ok(names)
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}
