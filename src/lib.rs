//! Scout — endpoint discovery for local OpenAI-compatible APIs.
//!
//! Scout probes a local server (Open WebUI, Ollama behind a proxy, etc.) with
//! a small, fixed set of candidate API base paths, confirms that a model can
//! actually answer a completion request, and prints a ready-to-paste Continue
//! `config.yaml` snippet for the first combination that works.
//!
//! # Quick start
//!
//! ```no_run
//! use scout::probe::Prober;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let prober = Prober::new("sk-local", "llama3", Duration::from_secs(3));
//! let (result, _notes) = prober.discover("localhost", 3000).await;
//! if let Some(found) = result {
//!     println!("{}", found.api_base);
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod probe;
pub mod render;
