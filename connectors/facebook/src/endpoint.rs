//! Endpoint selection and URL assembly.

use std::fmt;

use crate::config::FacebookConfig;

/// API surface a call is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Object/connection-oriented Graph API.
    Graph,
    /// Legacy query-oriented REST API, addressed by method name.
    Legacy,
}

/// HTTP method for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters travel in the URL query string.
    Get,
    /// Parameters travel as a form-encoded body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Target of a call before parameters are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Base URL plus normalized path.
    pub url: String,
    /// Method chosen by the caller.
    pub method: HttpMethod,
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedRequest {
    Get { url: String },
    Post { url: String, body: String },
}

impl Route {
    /// Attach an encoded parameter string (`?a=b&...`).
    ///
    /// GET appends it to the URL; POST sends it as the body without the `?`.
    #[must_use]
    pub fn prepare(self, encoded_parameters: &str) -> PreparedRequest {
        match self.method {
            HttpMethod::Get => PreparedRequest::Get {
                url: format!("{}{encoded_parameters}", self.url),
            },
            HttpMethod::Post => PreparedRequest::Post {
                url: self.url,
                body: encoded_parameters.trim_start_matches('?').to_string(),
            },
        }
    }
}

/// Chooses between the Graph and legacy base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRouter {
    graph_api_url: String,
    legacy_api_url: String,
}

impl EndpointRouter {
    /// Create a router for the given base URLs.
    pub fn new(graph_api_url: impl Into<String>, legacy_api_url: impl Into<String>) -> Self {
        Self {
            graph_api_url: graph_api_url.into().trim_end_matches('/').to_string(),
            legacy_api_url: legacy_api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a router from client configuration.
    #[must_use]
    pub fn from_config(config: &FacebookConfig) -> Self {
        Self::new(config.graph_api_url.as_str(), config.legacy_api_url.as_str())
    }

    /// Resolve `path` against the selected endpoint.
    #[must_use]
    pub fn route(&self, path: &str, endpoint: Endpoint, method: HttpMethod) -> Route {
        let base = match endpoint {
            Endpoint::Graph => &self.graph_api_url,
            Endpoint::Legacy => &self.legacy_api_url,
        };
        Route {
            url: format!("{base}{}", normalize_path(path)),
            method,
        }
    }
}

impl Default for EndpointRouter {
    fn default() -> Self {
        Self::from_config(&FacebookConfig::default())
    }
}

/// Trim whitespace and force exactly one leading `/`.
fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}
