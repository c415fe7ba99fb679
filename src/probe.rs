//! Sequential endpoint discovery over candidate API bases.
//!
//! For each candidate base, in priority order: list models, pick one matching
//! the hint, then confirm it answers a chat completion, falling back to the
//! legacy `prompt`-style completion. The first base/model pair that produces
//! a parseable completion wins and nothing after it is probed.

use crate::config::Config;
use crate::error::HttpError;
use crate::http::{decode_json, HttpClient};
use crate::models::{pick_model, ModelListing};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Connection settings confirmed to work against a live endpoint.
///
/// Created once at the moment discovery succeeds and consumed by the
/// renderer; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub api_base: String,
    pub model: String,
    /// True when only the legacy `/completions` shape succeeded.
    pub use_legacy_completions_endpoint: bool,
}

#[derive(Debug, Serialize)]
struct ChatProbeRequest<'a> {
    model: &'a str,
    messages: [ChatProbeMessage<'a>; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatProbeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct LegacyProbeRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

/// Ordered candidate API bases for a host/port pair.
///
/// Covers Open WebUI (`/api`, `/api/openai/v1`), plain OpenAI-compatible
/// servers (`/v1`), and servers mounted at the bare root.
pub fn candidate_api_bases(host: &str, port: u16) -> Vec<String> {
    let root = format!("http://{host}:{port}");
    vec![
        format!("{root}/api"),
        format!("{root}/v1"),
        format!("{root}/api/openai/v1"),
        root,
    ]
}

fn join(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Drives discovery across the fixed candidate list.
#[derive(Debug, Clone)]
pub struct Prober {
    http: HttpClient,
    api_key: String,
    model_hint: String,
}

impl Prober {
    pub fn new(api_key: impl Into<String>, model_hint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: HttpClient::new(timeout),
            api_key: api_key.into(),
            model_hint: model_hint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.model_hint.clone(),
            config.timeout(),
        )
    }

    /// Probe every candidate base in order, first success wins.
    ///
    /// Returns the discovered settings (if any) plus one diagnostic note per
    /// HTTP attempt, in the order the attempts were made. Connection-level
    /// failures are absorbed: the attempt is noted and the search continues.
    pub async fn discover(&self, host: &str, port: u16) -> (Option<ProbeResult>, Vec<String>) {
        let mut notes = Vec::new();
        for base in candidate_api_bases(host, port) {
            let (ids, note) = self.probe_models(&base).await;
            notes.push(note);

            // Never probe completions without a model to name in the payload.
            let Some(model) = ids
                .as_deref()
                .and_then(|ids| pick_model(ids, &self.model_hint))
                .map(str::to_string)
            else {
                continue;
            };

            let (ok, note) = self.probe_chat(&base, &model).await;
            notes.push(note);
            if ok {
                return (
                    Some(ProbeResult {
                        api_base: base,
                        model,
                        use_legacy_completions_endpoint: false,
                    }),
                    notes,
                );
            }

            let (ok, note) = self.probe_legacy_completions(&base, &model).await;
            notes.push(note);
            if ok {
                return (
                    Some(ProbeResult {
                        api_base: base,
                        model,
                        use_legacy_completions_endpoint: true,
                    }),
                    notes,
                );
            }
        }
        (None, notes)
    }

    /// GET `{base}/models`. Ids are available only on an exact 200 with a
    /// recognized listing shape; any other status means "no ids", which is
    /// distinct from a 200 that listed nothing.
    async fn probe_models(&self, base: &str) -> (Option<Vec<String>>, String) {
        let url = join(base, "/models");
        match self.http.get(&url, &self.api_key).await {
            Ok(resp) => {
                debug!(%url, status = resp.status, "models probe");
                let ids = (resp.status == 200).then(|| {
                    decode_json(&resp)
                        .as_ref()
                        .and_then(ModelListing::from_payload)
                        .map(ModelListing::into_ids)
                        .unwrap_or_default()
                });
                (ids, format!("{url} -> {}", resp.status))
            }
            Err(err) => (None, failure_note(&url, &err)),
        }
    }

    /// POST `{base}/chat/completions`. Success is a 200 with any parseable
    /// JSON body; the content is not inspected further.
    async fn probe_chat(&self, base: &str, model: &str) -> (bool, String) {
        let url = join(base, "/chat/completions");
        let request = ChatProbeRequest {
            model,
            messages: [ChatProbeMessage {
                role: "user",
                content: "ping",
            }],
            stream: false,
        };
        match self.http.post_json(&url, &self.api_key, &request).await {
            Ok(resp) => {
                debug!(%url, status = resp.status, "chat completion probe");
                let ok = resp.status == 200 && decode_json(&resp).is_some();
                (ok, format!("{url} -> {}", resp.status))
            }
            Err(err) => (false, failure_note(&url, &err)),
        }
    }

    /// POST `{base}/completions`, the legacy `prompt`-based shape.
    async fn probe_legacy_completions(&self, base: &str, model: &str) -> (bool, String) {
        let url = join(base, "/completions");
        let request = LegacyProbeRequest {
            model,
            prompt: "ping",
            max_tokens: 8,
        };
        match self.http.post_json(&url, &self.api_key, &request).await {
            Ok(resp) => {
                debug!(%url, status = resp.status, "legacy completion probe");
                let ok = resp.status == 200 && decode_json(&resp).is_some();
                (ok, format!("{url} -> {}", resp.status))
            }
            Err(err) => (false, failure_note(&url, &err)),
        }
    }
}

fn failure_note(url: &str, err: &HttpError) -> String {
    debug!(%url, error = %err, "probe attempt failed");
    format!("{url} -> {}", err.summary())
}
