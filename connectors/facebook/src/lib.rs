//! Facebook API Client
//!
//! A client for the Facebook Graph API and the legacy REST (FQL) API.
//!
//! ## Operations
//!
//! ### Graph API (GET)
//! - `fetch_object` - A single object by path
//! - `fetch_objects` - Several objects by ID in one request
//! - `fetch_connection` - One page of a connection, with paging flags
//!
//! ### Legacy API (POST)
//! - `execute_query` - A single FQL query
//! - `execute_multiquery` - Several named FQL queries in one request
//!
//! ### Not yet supported
//! - `publish`, `delete_object`
//!
//! The HTTP transport ([`WebRequestor`]) and the JSON decoder
//! ([`JsonMapper`]) are pluggable; `reqwest` and `serde_json` backed
//! implementations are provided.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod batch;
mod client;
mod config;
mod connection;
mod endpoint;
mod error;
mod mapper;
mod multiquery;
mod parameter;
mod requestor;
mod response;

pub use batch::{normalize_ids, read_batch};
pub use client::FacebookClient;
pub use config::FacebookConfig;
pub use connection::{Connection, read_page};
pub use endpoint::{Endpoint, EndpointRouter, HttpMethod, PreparedRequest, Route};
pub use error::{ApiErrorSource, FacebookError, FacebookResult};
pub use mapper::{JsonMapper, SerdeJsonMapper};
pub use multiquery::{QueryMap, build_payload, normalize_results};
pub use parameter::{
    ACCESS_TOKEN_PARAM_NAME, FETCH_OBJECTS_RESERVED_PARAM_NAMES, FORMAT_PARAM_NAME,
    IDS_PARAM_NAME, METHOD_PARAM_NAME, MULTIQUERY_RESERVED_PARAM_NAMES, Parameter, ParameterSet,
    QUERIES_PARAM_NAME, QUERY_PARAM_NAME, QUERY_RESERVED_PARAM_NAMES, RESERVED_PARAM_NAMES,
};
pub use requestor::{ReqwestWebRequestor, TransportError, WebRequestor};
pub use response::{HTTP_OK, RawResponse, classify};
