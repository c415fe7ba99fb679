//! Continue `config.yaml` snippet rendering.

use crate::probe::ProbeResult;

/// Context providers emitted with every generated config, in fixed order.
const CONTEXT_PROVIDERS: [&str; 7] = [
    "code", "docs", "diff", "terminal", "problems", "folder", "codebase",
];

/// Render the discovered settings as a Continue config snippet.
///
/// Pure: identical inputs produce byte-identical output. The text ends with
/// a single trailing newline after the last context line.
pub fn render_config(
    result: &ProbeResult,
    api_key: &str,
    title: &str,
    model_name: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("name: {title}"));
    lines.push("version: 1.0.0".to_string());
    lines.push("schema: v1".to_string());
    lines.push("models:".to_string());
    lines.push(format!("  - name: {model_name}"));
    lines.push("    provider: openai".to_string());
    lines.push(format!("    model: {}", result.model));
    lines.push("    env:".to_string());
    lines.push(format!(
        "      useLegacyCompletionsEndpoint: {}",
        result.use_legacy_completions_endpoint
    ));
    lines.push(format!("    apiBase: {}", result.api_base));
    lines.push(format!("    apiKey: {}", yaml_quote(api_key)));
    lines.push("    roles:".to_string());
    lines.push("      - chat".to_string());
    lines.push("      - edit".to_string());
    lines.push("context:".to_string());
    for provider in CONTEXT_PROVIDERS {
        lines.push(format!("  - provider: {provider}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Double-quote a YAML scalar, escaping backslashes and double quotes only.
fn yaml_quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
