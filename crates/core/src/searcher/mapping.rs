//! Mapping of raw search API JSON onto `SearchEntry`.

use serde_json::{Map, Value};

use crate::config::FieldMapping;

use super::{SearchEntry, SearchError};

/// Parse a search API response body.
///
/// The array under `mapping.results` is mapped entry by entry; elements
/// that are not objects are skipped.
pub fn parse_search_response(
    body: &[u8],
    mapping: &FieldMapping,
) -> Result<Vec<SearchEntry>, SearchError> {
    let root: Value = serde_json::from_slice(body)
        .map_err(|e| SearchError::ParseError(format!("invalid JSON: {}", e)))?;

    let results = root
        .get(&mapping.results)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SearchError::ParseError(format!("missing array field '{}'", mapping.results))
        })?;

    Ok(results
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| entry_from_object(obj, mapping))
        .collect())
}

/// Build a `SearchEntry` from one result object.
pub fn entry_from_object(obj: &Map<String, Value>, mapping: &FieldMapping) -> SearchEntry {
    SearchEntry {
        id: obj.get(&mapping.id).map(id_string).unwrap_or_default(),
        file_url: text(obj, &mapping.file).unwrap_or_default(),
        info: text(obj, &mapping.info),
        author: text(obj, &mapping.author),
        tags: text(obj, &mapping.tags),
        source: text(obj, &mapping.source),
        score: obj.get(&mapping.score).map(score).unwrap_or(0.0),
    }
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn score(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
