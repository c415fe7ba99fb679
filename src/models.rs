//! Model-listing decode and hint-based selection.

use serde_json::Value;

/// Recognized shapes for a `/models` listing payload.
///
/// Servers disagree on the listing envelope, so decoding tries each shape in
/// a fixed fallback order and stops at the first structural match. Elements
/// that are not objects, or objects with no usable identifier, are skipped
/// rather than failing the whole listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelListing {
    /// OpenAI-style envelope: `{"data": [{"id": ...}, ...]}`.
    Data(Vec<String>),
    /// Keyed envelope: `{"models": [{"id" | "name": ...}, ...]}`.
    Keyed(Vec<String>),
    /// A bare array of model objects.
    Bare(Vec<String>),
}

impl ModelListing {
    /// Decode a payload into the first matching listing shape.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        if let Some(items) = payload.get("data").and_then(Value::as_array) {
            return Some(Self::Data(collect_ids(items, false)));
        }
        if let Some(items) = payload.get("models").and_then(Value::as_array) {
            return Some(Self::Keyed(collect_ids(items, true)));
        }
        if let Some(items) = payload.as_array() {
            return Some(Self::Bare(collect_ids(items, true)));
        }
        None
    }

    /// Model identifiers in the order the server listed them.
    pub fn into_ids(self) -> Vec<String> {
        match self {
            Self::Data(ids) | Self::Keyed(ids) | Self::Bare(ids) => ids,
        }
    }
}

fn collect_ids(items: &[Value], name_fallback: bool) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let value = non_null(obj.get("id"))
                .or_else(|| name_fallback.then(|| non_null(obj.get("name"))).flatten())?;
            Some(stringify(value))
        })
        .collect()
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pick a model id from `ids`, preferring the first whose lowercase form
/// contains `hint` (lowercased). Falls back to the first id; empty input
/// yields `None`. Linear scan, ties broken by listing order.
pub fn pick_model<'a>(ids: &'a [String], hint: &str) -> Option<&'a str> {
    let first = ids.first()?;
    if !hint.is_empty() {
        let needle = hint.to_lowercase();
        if let Some(found) = ids.iter().find(|id| id.to_lowercase().contains(&needle)) {
            return Some(found);
        }
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(payload: Value) -> Vec<String> {
        ModelListing::from_payload(&payload)
            .map(ModelListing::into_ids)
            .unwrap_or_default()
    }

    #[test]
    fn data_shape_collects_ids() {
        let payload = json!({"data": [{"id": "llama3:8b"}, {"id": "mistral"}]});
        assert_eq!(ids(payload), vec!["llama3:8b", "mistral"]);
    }

    #[test]
    fn data_shape_skips_elements_without_id() {
        let payload = json!({"data": [{"id": "a"}, {"name": "no-id"}, "bare", 7, {"id": "b"}]});
        assert_eq!(ids(payload), vec!["a", "b"]);
    }

    #[test]
    fn data_shape_takes_priority_over_models_key() {
        let payload = json!({"data": [{"id": "from-data"}], "models": [{"id": "from-models"}]});
        assert_eq!(
            ModelListing::from_payload(&payload),
            Some(ModelListing::Data(vec!["from-data".to_string()]))
        );
    }

    #[test]
    fn models_shape_falls_back_to_name() {
        let payload = json!({"models": [{"id": "by-id"}, {"name": "by-name"}]});
        assert_eq!(ids(payload), vec!["by-id", "by-name"]);
    }

    #[test]
    fn bare_list_shape() {
        let payload = json!([{"name": "llama3:latest"}, {"id": "phi3"}]);
        assert_eq!(ids(payload), vec!["llama3:latest", "phi3"]);
    }

    #[test]
    fn non_string_ids_are_stringified() {
        let payload = json!({"data": [{"id": 42}]});
        assert_eq!(ids(payload), vec!["42"]);
    }

    #[test]
    fn null_id_falls_back_to_name() {
        let payload = json!({"models": [{"id": null, "name": "named"}]});
        assert_eq!(ids(payload), vec!["named"]);
    }

    #[test]
    fn unrecognized_shapes_yield_no_listing() {
        for payload in [json!({"items": []}), json!("text"), json!(3), json!(null)] {
            assert_eq!(ModelListing::from_payload(&payload), None);
        }
    }

    #[test]
    fn data_key_with_non_list_value_is_not_a_match() {
        // `data` present but not a list: fall through, and with no other
        // shape matching, there is no listing at all.
        let payload = json!({"data": "nope"});
        assert_eq!(ModelListing::from_payload(&payload), None);
    }

    #[test]
    fn pick_prefers_hint_match_in_order() {
        let ids: Vec<String> = ["a", "llama3:8b", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(pick_model(&ids, "llama3"), Some("llama3:8b"));
    }

    #[test]
    fn pick_is_case_insensitive() {
        let ids: Vec<String> = ["Meta-LLaMA3-70B".to_string()].to_vec();
        assert_eq!(pick_model(&ids, "llama3"), Some("Meta-LLaMA3-70B"));
    }

    #[test]
    fn pick_falls_back_to_first_when_no_match() {
        let ids: Vec<String> = ["a".to_string(), "b".to_string()].to_vec();
        assert_eq!(pick_model(&ids, "zzz"), Some("a"));
    }

    #[test]
    fn pick_empty_hint_returns_first() {
        let ids: Vec<String> = ["a".to_string(), "llama3:8b".to_string()].to_vec();
        assert_eq!(pick_model(&ids, ""), Some("a"));
    }

    #[test]
    fn pick_empty_ids_returns_none() {
        assert_eq!(pick_model(&[], "llama3"), None);
    }
}
