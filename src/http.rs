//! Normalized HTTP transport for probe requests.
//!
//! Every request is fully read into an [`HttpResponse`] regardless of status
//! code, so a 401 or 404 is observable data rather than a failure. Only
//! connection-level problems (refused, timeout, malformed URL) surface as
//! [`HttpError`].

use crate::error::HttpError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// One fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names lowercased; last write wins on duplicates.
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Thin wrapper around one [`reqwest::Client`] with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        // Fall back to reqwest defaults if builder creation fails for any reason.
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http }
    }

    /// GET `url` with bearer auth.
    pub async fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse, HttpError> {
        finish(with_auth(self.http.get(url), api_key)).await
    }

    /// POST a JSON body to `url` with bearer auth.
    pub async fn post_json<T: Serialize>(
        &self,
        url: &str,
        api_key: &str,
        body: &T,
    ) -> Result<HttpResponse, HttpError> {
        finish(with_auth(self.http.post(url).json(body), api_key)).await
    }
}

fn with_auth(req: reqwest::RequestBuilder, api_key: &str) -> reqwest::RequestBuilder {
    req.header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
}

async fn finish(req: reqwest::RequestBuilder) -> Result<HttpResponse, HttpError> {
    let response = req.send().await?;
    let status = response.status().as_u16();
    let mut headers = BTreeMap::new();
    for (name, value) in response.headers() {
        headers.insert(
            name.as_str().to_ascii_lowercase(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    let body = response.bytes().await?.to_vec();
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Best-effort JSON decode of a response body.
///
/// Empty or malformed bodies yield `None`; this never errors.
pub fn decode_json(resp: &HttpResponse) -> Option<serde_json::Value> {
    if resp.body.is_empty() {
        return None;
    }
    serde_json::from_slice(&resp.body).ok()
}
