//! CLI argument parsing via clap.

use clap::Parser;
use scout::config::Overrides;

/// Discover working settings for a local OpenAI-compatible API and print a
/// Continue config snippet.
#[derive(Debug, Parser)]
#[command(name = "scout", version)]
pub struct Args {
    /// API host.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// API port.
    #[arg(long = "port")]
    pub port: Option<u16>,

    /// Bearer API key. May also come from SCOUT_API_KEY or a local `.env`.
    #[arg(long = "api-key")]
    pub api_key: Option<String>,

    /// Case-insensitive substring used to pick a model from the listing.
    #[arg(long = "model-hint")]
    pub model_hint: Option<String>,

    /// Display title for the generated config.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Display model name for the generated config.
    #[arg(long = "model-name")]
    pub model_name: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout")]
    pub timeout: Option<f64>,

    /// Print every probe attempt to stderr.
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Args {
    /// Convert parsed flags into config-layer overrides. The `--debug` flag
    /// only overrides when actually passed, so SCOUT_DEBUG can still apply.
    pub fn into_overrides(self) -> Overrides {
        Overrides {
            host: self.host,
            port: self.port,
            api_key: self.api_key,
            model_hint: self.model_hint,
            title: self.title,
            model_name: self.model_name,
            timeout_secs: self.timeout,
            debug: self.debug.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn all_flags_parse() {
        let args = Args::parse_from([
            "scout",
            "--host",
            "box",
            "--port",
            "8080",
            "--api-key",
            "sk-x",
            "--model-hint",
            "phi",
            "--title",
            "Box",
            "--model-name",
            "Phi",
            "--timeout",
            "1.5",
            "--debug",
        ]);
        assert_eq!(args.host.as_deref(), Some("box"));
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.api_key.as_deref(), Some("sk-x"));
        assert_eq!(args.timeout, Some(1.5));
        assert!(args.debug);
    }

    #[test]
    fn no_flags_leave_everything_unset() {
        let args = Args::parse_from(["scout"]);
        let overrides = args.into_overrides();
        assert!(overrides.host.is_none());
        assert!(overrides.api_key.is_none());
        assert_eq!(overrides.debug, None);
    }

    #[test]
    fn debug_flag_maps_to_explicit_override() {
        let overrides = Args::parse_from(["scout", "--debug"]).into_overrides();
        assert_eq!(overrides.debug, Some(true));
    }
}
