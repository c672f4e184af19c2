//! JSON-to-type decoding used by the client.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{FacebookError, FacebookResult};

/// Decodes response JSON into caller types.
///
/// Every failure is reported as [`FacebookError::Mapping`].
pub trait JsonMapper: Send + Sync {
    /// Decode a single value.
    fn to_object<T: DeserializeOwned>(&self, json: &str) -> FacebookResult<T>;

    /// Decode a JSON array into a list.
    fn to_list<T: DeserializeOwned>(&self, json: &str) -> FacebookResult<Vec<T>>;

    /// Render a value as JSON text.
    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> FacebookResult<String>;
}

/// [`JsonMapper`] backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonMapper;

impl JsonMapper for SerdeJsonMapper {
    fn to_object<T: DeserializeOwned>(&self, json: &str) -> FacebookResult<T> {
        serde_json::from_str(json).map_err(|err| {
            FacebookError::mapping(format!("Unable to map JSON to {}: {err}", type_name::<T>()))
        })
    }

    fn to_list<T: DeserializeOwned>(&self, json: &str) -> FacebookResult<Vec<T>> {
        serde_json::from_str(json).map_err(|err| {
            FacebookError::mapping(format!(
                "Unable to map JSON to a list of {}: {err}",
                type_name::<T>()
            ))
        })
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> FacebookResult<String> {
        serde_json::to_string(value).map_err(|err| {
            FacebookError::mapping(format!("Unable to map {} to JSON: {err}", type_name::<T>()))
        })
    }
}

fn type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
