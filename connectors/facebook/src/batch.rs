//! Multiple-object fetches keyed by ID.

use serde_json::Value;

use crate::error::{FacebookError, FacebookResult};

/// Trim and lower-case every ID, rejecting an empty list or blank IDs.
///
/// Duplicates are kept.
pub fn normalize_ids<S: AsRef<str>>(ids: &[S]) -> FacebookResult<Vec<String>> {
    if ids.is_empty() {
        return Err(FacebookError::invalid("The list of IDs cannot be empty."));
    }

    ids.iter()
        .map(|id| {
            let id = id.as_ref().trim().to_lowercase();
            if id.is_empty() {
                Err(FacebookError::invalid(
                    "The list of IDs cannot contain blank strings.",
                ))
            } else {
                Ok(id)
            }
        })
        .collect()
}

/// Pick the raw JSON for each requested ID out of a batch response.
///
/// Output follows the order of `ids`. IDs the response does not mention are
/// skipped, so the result may be shorter than `ids`.
pub fn read_batch(body: &str, ids: &[String]) -> FacebookResult<Vec<String>> {
    let json: Value = serde_json::from_str(body)?;
    let object = json
        .as_object()
        .ok_or_else(|| FacebookError::mapping("Batch response is not a JSON object"))?;

    Ok(ids
        .iter()
        .filter_map(|id| object.get(id).map(Value::to_string))
        .collect())
}
