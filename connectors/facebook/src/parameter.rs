//! Request parameters and query-string encoding.
//!
//! Callers pass arbitrary [`Parameter`]s; the client injects a handful of its
//! own (`format`, `access_token`, and per-operation names such as `ids`).
//! Reserved names are checked against an explicit per-operation list before
//! anything touches the network.

use std::collections::HashSet;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::error::{FacebookError, FacebookResult};
use crate::mapper::{JsonMapper, SerdeJsonMapper};

/// Access token parameter, always appended last.
pub const ACCESS_TOKEN_PARAM_NAME: &str = "access_token";
/// Method override parameter.
pub const METHOD_PARAM_NAME: &str = "method";
/// Result format parameter.
pub const FORMAT_PARAM_NAME: &str = "format";
/// Multiple-IDs parameter used by batch fetches.
pub const IDS_PARAM_NAME: &str = "ids";
/// Query text parameter used by legacy queries.
pub const QUERY_PARAM_NAME: &str = "query";
/// Multiquery payload parameter.
pub const QUERIES_PARAM_NAME: &str = "queries";

/// Names no caller may supply on any operation.
pub const RESERVED_PARAM_NAMES: &[&str] = &[
    ACCESS_TOKEN_PARAM_NAME,
    METHOD_PARAM_NAME,
    FORMAT_PARAM_NAME,
];

/// Reserved names for multiple-object fetches.
pub const FETCH_OBJECTS_RESERVED_PARAM_NAMES: &[&str] = &[
    ACCESS_TOKEN_PARAM_NAME,
    METHOD_PARAM_NAME,
    FORMAT_PARAM_NAME,
    IDS_PARAM_NAME,
];

/// Reserved names for FQL queries.
pub const QUERY_RESERVED_PARAM_NAMES: &[&str] = &[
    ACCESS_TOKEN_PARAM_NAME,
    METHOD_PARAM_NAME,
    FORMAT_PARAM_NAME,
    QUERY_PARAM_NAME,
];

/// Reserved names for FQL multiqueries.
pub const MULTIQUERY_RESERVED_PARAM_NAMES: &[&str] = &[
    ACCESS_TOKEN_PARAM_NAME,
    METHOD_PARAM_NAME,
    FORMAT_PARAM_NAME,
    QUERIES_PARAM_NAME,
];

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A single name/value request argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// Create a parameter from any displayable value.
    pub fn with(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Create a parameter whose value is the JSON rendering of `value`.
    ///
    /// Strings are sent verbatim rather than as quoted JSON strings.
    pub fn json<T: Serialize + ?Sized>(name: impl Into<String>, value: &T) -> FacebookResult<Self> {
        let json = SerdeJsonMapper.to_json(value)?;
        let value = match serde_json::from_str::<String>(&json) {
            Ok(text) => text,
            Err(_) => json,
        };
        Ok(Self {
            name: name.into(),
            value,
        })
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serialized parameter value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered parameters for one API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the set holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    /// Whether a parameter with `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.iter().any(|parameter| parameter.name == name)
    }

    /// Append a caller-supplied parameter.
    pub fn push(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Append an internally-injected parameter, replacing any same-named entry.
    #[must_use]
    pub fn with_internal(mut self, parameter: Parameter) -> Self {
        self.parameters.retain(|existing| existing.name != parameter.name);
        self.parameters.push(parameter);
        self
    }

    /// Reject blank names, repeated names, and any name listed in `reserved`.
    pub fn validate(&self, reserved: &[&str]) -> FacebookResult<()> {
        let mut seen = HashSet::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            if parameter.name.trim().is_empty() {
                return Err(FacebookError::invalid("Parameter names cannot be blank."));
            }
            if reserved.contains(&parameter.name.as_str()) {
                return Err(FacebookError::invalid(format!(
                    "Parameter '{}' is reserved for internal use - you cannot specify it yourself.",
                    parameter.name
                )));
            }
            if !seen.insert(parameter.name.as_str()) {
                return Err(FacebookError::invalid(format!(
                    "Parameter '{}' was specified more than once.",
                    parameter.name
                )));
            }
        }
        Ok(())
    }

    /// Render `?name=value&...` with the access token appended last.
    ///
    /// Returns an empty string only when the set and the token are both empty.
    #[must_use]
    pub fn encode(&self, access_token: &str) -> String {
        let token = (!access_token.is_empty())
            .then(|| Parameter::with(ACCESS_TOKEN_PARAM_NAME, access_token));
        let encoded = self
            .parameters
            .iter()
            .chain(token.as_ref())
            .map(|parameter| {
                format!(
                    "{}={}",
                    utf8_percent_encode(&parameter.name, QUERY_ENCODE_SET),
                    utf8_percent_encode(&parameter.value, QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }
}

impl From<&[Parameter]> for ParameterSet {
    fn from(parameters: &[Parameter]) -> Self {
        Self {
            parameters: parameters.to_vec(),
        }
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
        encoded
            .trim_start_matches('?')
            .split('&')
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap();
                (
                    percent_decode_str(name).decode_utf8().unwrap().into_owned(),
                    percent_decode_str(value).decode_utf8().unwrap().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn validate_rejects_each_reserved_name() {
        for name in RESERVED_PARAM_NAMES {
            let set: ParameterSet = [Parameter::with(*name, "x")].into_iter().collect();
            let err = set.validate(RESERVED_PARAM_NAMES).unwrap_err();
            assert!(err.is_invalid_parameter(), "{name} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_reserved_names_in_combination() {
        let set: ParameterSet = [
            Parameter::with("limit", 10),
            Parameter::with(FORMAT_PARAM_NAME, "xml"),
            Parameter::with(ACCESS_TOKEN_PARAM_NAME, "stolen"),
        ]
        .into_iter()
        .collect();
        assert!(set.validate(RESERVED_PARAM_NAMES).is_err());
    }

    #[test]
    fn validate_uses_only_the_given_reserved_names() {
        let set: ParameterSet = [Parameter::with(IDS_PARAM_NAME, "1,2")].into_iter().collect();
        assert!(set.validate(RESERVED_PARAM_NAMES).is_ok());
        assert!(set.validate(&[IDS_PARAM_NAME]).is_err());
    }

    #[test]
    fn operation_reserved_sets_extend_the_base_set() {
        for (reserved, extra) in [
            (FETCH_OBJECTS_RESERVED_PARAM_NAMES, IDS_PARAM_NAME),
            (QUERY_RESERVED_PARAM_NAMES, QUERY_PARAM_NAME),
            (MULTIQUERY_RESERVED_PARAM_NAMES, QUERIES_PARAM_NAME),
        ] {
            for name in RESERVED_PARAM_NAMES.iter().chain([&extra]) {
                let set: ParameterSet = [Parameter::with(*name, "x")].into_iter().collect();
                assert!(set.validate(reserved).is_err(), "{name} should be rejected");
            }
        }
    }

    #[test]
    fn validate_rejects_blank_names() {
        let set: ParameterSet = [Parameter::with("  ", "x")].into_iter().collect();
        assert!(set.validate(&[]).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn validate_rejects_repeated_names() {
        let set: ParameterSet = [
            Parameter::with("limit", 1),
            Parameter::with("fields", "id"),
            Parameter::with("limit", 2),
        ]
        .into_iter()
        .collect();
        let err = set.validate(RESERVED_PARAM_NAMES).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("'limit'"));
    }

    #[test]
    fn encode_appends_access_token_last() {
        let set: ParameterSet = [Parameter::with("fields", "id,name"), Parameter::with("limit", 5)]
            .into_iter()
            .collect();
        assert_eq!(
            set.encode("tok"),
            "?fields=id%2Cname&limit=5&access_token=tok"
        );
    }

    #[test]
    fn encode_is_deterministic() {
        let set: ParameterSet = [Parameter::with("b", 2), Parameter::with("a", 1)]
            .into_iter()
            .collect();
        assert_eq!(set.encode("tok"), set.encode("tok"));
        assert_eq!(set.encode("tok"), "?b=2&a=1&access_token=tok");
    }

    #[test]
    fn encode_round_trips_special_characters() {
        let value = "a b&c=d/é☃+%";
        let set: ParameterSet = [Parameter::with("q&=", value)].into_iter().collect();
        let encoded = set.encode("t k");
        assert!(!encoded.contains(' '));
        assert_eq!(
            decode_pairs(&encoded),
            vec![
                ("q&=".to_string(), value.to_string()),
                ("access_token".to_string(), "t k".to_string()),
            ]
        );
    }

    #[test]
    fn encode_without_parameters_or_token_is_empty() {
        assert_eq!(ParameterSet::new().encode(""), "");
        assert_eq!(ParameterSet::new().encode("tok"), "?access_token=tok");
    }

    #[test]
    fn internal_parameters_replace_same_named_entries() {
        let set: ParameterSet = [Parameter::with("format", "xml"), Parameter::with("limit", 1)]
            .into_iter()
            .collect();
        let set = set.with_internal(Parameter::with(FORMAT_PARAM_NAME, "json"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.encode(""), "?limit=1&format=json");
    }

    #[test]
    fn json_parameter_serializes_structured_values() {
        let parameter = Parameter::json("fields", &["id", "name"]).unwrap();
        assert_eq!(parameter.value(), r#"["id","name"]"#);

        let parameter = Parameter::json("q", "plain").unwrap();
        assert_eq!(parameter.value(), "plain");

        let parameter = Parameter::json("limit", &25).unwrap();
        assert_eq!(parameter.value(), "25");
    }

    #[test]
    fn json_parameter_reports_unencodable_values() {
        let value = std::collections::BTreeMap::from([((1, 2), "tuple keys")]);
        let err = Parameter::json("bad", &value).unwrap_err();
        assert!(matches!(err, FacebookError::Mapping(_)));
    }
}
