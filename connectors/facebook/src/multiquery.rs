//! FQL multiquery request and response shaping.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{FacebookError, FacebookResult};

/// Query name to FQL text.
pub type QueryMap = BTreeMap<String, String>;

/// Render queries as the JSON object sent in the `queries` parameter.
///
/// Names and query text are trimmed; both must be non-blank, and two names
/// may not collide after trimming.
pub fn build_payload(queries: &QueryMap) -> FacebookResult<String> {
    if queries.is_empty() {
        return Err(FacebookError::invalid("You must specify at least one query."));
    }

    let mut payload = Map::new();
    for (name, query) in queries {
        let (name, query) = (name.trim(), query.trim());
        if name.is_empty() || query.is_empty() {
            return Err(FacebookError::invalid(format!(
                "Provided queries must have non-blank keys and values. You provided: {queries:?}"
            )));
        }
        if payload
            .insert(name.to_string(), Value::String(query.to_string()))
            .is_some()
        {
            return Err(FacebookError::invalid(format!(
                "Query name '{name}' was provided more than once."
            )));
        }
    }

    Ok(Value::Object(payload).to_string())
}

/// Re-key `[{"name": .., "fql_result_set": [..]}, ..]` into `{name: [..], ..}`.
pub fn normalize_results(body: &str) -> FacebookResult<String> {
    let json: Value = serde_json::from_str(body)?;
    let results = json
        .as_array()
        .ok_or_else(|| FacebookError::mapping("Multiquery response is not a JSON array"))?;

    let mut normalized = Map::new();
    for result in results {
        let name = result
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| FacebookError::mapping("Multiquery result is missing 'name'"))?;
        let result_set = result
            .get("fql_result_set")
            .filter(|value| value.is_array())
            .ok_or_else(|| {
                FacebookError::mapping(format!(
                    "Multiquery result '{name}' is missing 'fql_result_set'"
                ))
            })?;
        normalized.insert(name.to_string(), result_set.clone());
    }

    Ok(Value::Object(normalized).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn queries(entries: &[(&str, &str)]) -> QueryMap {
        entries
            .iter()
            .map(|(name, query)| ((*name).to_string(), (*query).to_string()))
            .collect()
    }

    #[test]
    fn payload_maps_trimmed_names_to_trimmed_queries() {
        let payload = build_payload(&queries(&[
            (" users ", " SELECT uid FROM user WHERE uid=4 "),
            ("likes", "SELECT page_id FROM page_fan WHERE uid=4"),
        ]))
        .unwrap();
        let parsed: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(
            parsed,
            json!({
                "users": "SELECT uid FROM user WHERE uid=4",
                "likes": "SELECT page_id FROM page_fan WHERE uid=4"
            })
        );
    }

    #[test]
    fn payload_rejects_empty_and_blank_entries() {
        assert!(build_payload(&QueryMap::new()).unwrap_err().is_invalid_parameter());
        assert!(build_payload(&queries(&[("q1", "  ")])).unwrap_err().is_invalid_parameter());
        assert!(build_payload(&queries(&[(" ", "SELECT 1")])).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn payload_rejects_names_colliding_after_trim() {
        let err = build_payload(&queries(&[("q1", "SELECT 1"), (" q1", "SELECT 2")])).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn results_are_rekeyed_by_name() {
        let body = json!([
            {"name": "q1", "fql_result_set": [{"x": 1}]},
            {"name": "q2", "fql_result_set": []}
        ]);
        let normalized: Value =
            serde_json::from_str(&normalize_results(&body.to_string()).unwrap()).unwrap();
        assert_eq!(normalized, json!({"q1": [{"x": 1}], "q2": []}));
    }

    #[test]
    fn results_missing_fields_are_mapping_errors() {
        for body in [
            json!([{"fql_result_set": []}]),
            json!([{"name": "q1"}]),
            json!([{"name": "q1", "fql_result_set": {}}]),
            json!({"name": "q1", "fql_result_set": []}),
        ] {
            let err = normalize_results(&body.to_string()).unwrap_err();
            assert!(matches!(err, FacebookError::Mapping(_)), "{body}");
        }
    }
}
