//! Transport outcome classification.

use serde_json::Value;
use tracing::warn;

use crate::error::{ApiErrorSource, FacebookError, FacebookResult};

/// HTTP 200, the only status treated as success.
pub const HTTP_OK: u16 = 200;

/// Status code and body returned by a [`crate::WebRequestor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body text.
    pub body: String,
}

impl RawResponse {
    /// Create a response.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// Turn a raw response into its JSON body text, or the failure it encodes.
///
/// A non-200 status fails as [`FacebookError::Network`] without looking at
/// the body. Otherwise the body must be JSON; Graph-style and legacy-style
/// error objects fail as [`FacebookError::ApiResponse`].
pub fn classify(response: RawResponse) -> FacebookResult<String> {
    if response.status_code != HTTP_OK {
        return Err(FacebookError::Network {
            status_code: Some(response.status_code),
            message: "Facebook request failed".into(),
        });
    }

    let json: Value = serde_json::from_str(&response.body).map_err(|err| {
        FacebookError::mapping(format!("Facebook response body is not valid JSON: {err}"))
    })?;

    if let Some(err) = api_error(&json) {
        warn!(error = %err, "Facebook API reported an error");
        return Err(err);
    }

    Ok(response.body)
}

fn api_error(json: &Value) -> Option<FacebookError> {
    let object = json.as_object()?;

    if let Some(Value::Object(error)) = object.get("error") {
        return Some(FacebookError::ApiResponse {
            code: text_field(error.get("type")),
            message: text_field(error.get("message")),
            origin: ApiErrorSource::Graph,
        });
    }

    object.get("error_code").map(|code| FacebookError::ApiResponse {
        code: text_field(Some(code)),
        message: text_field(object.get("error_msg")),
        origin: ApiErrorSource::Legacy,
    })
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
