//! Facebook API client.
//!
//! Every implemented operation runs the same pipeline: validate caller
//! parameters against the operation's reserved names, inject internal
//! parameters, encode, route, execute, classify, then extract and decode.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::{
    batch::{normalize_ids, read_batch},
    config::FacebookConfig,
    connection::{Connection, read_page},
    endpoint::{Endpoint, EndpointRouter, HttpMethod, PreparedRequest},
    error::{FacebookError, FacebookResult},
    mapper::{JsonMapper, SerdeJsonMapper},
    multiquery::{QueryMap, build_payload, normalize_results},
    parameter::{
        FETCH_OBJECTS_RESERVED_PARAM_NAMES, FORMAT_PARAM_NAME, IDS_PARAM_NAME,
        MULTIQUERY_RESERVED_PARAM_NAMES, Parameter, ParameterSet, QUERIES_PARAM_NAME,
        QUERY_PARAM_NAME, QUERY_RESERVED_PARAM_NAMES, RESERVED_PARAM_NAMES,
    },
    requestor::{ReqwestWebRequestor, WebRequestor},
    response::classify,
};

/// Legacy method name for single FQL queries.
const FQL_QUERY_METHOD: &str = "fql.query";
/// Legacy method name for FQL multiqueries.
const FQL_MULTIQUERY_METHOD: &str = "fql.multiquery";

/// One call through the shared request pipeline.
struct ApiCall<'a> {
    path: &'a str,
    endpoint: Endpoint,
    method: HttpMethod,
    reserved: &'static [&'static str],
    injected: Option<Parameter>,
}

impl<'a> ApiCall<'a> {
    const fn graph_get(path: &'a str, reserved: &'static [&'static str]) -> Self {
        Self {
            path,
            endpoint: Endpoint::Graph,
            method: HttpMethod::Get,
            reserved,
            injected: None,
        }
    }

    const fn legacy_post(method_name: &'a str, reserved: &'static [&'static str]) -> Self {
        Self {
            path: method_name,
            endpoint: Endpoint::Legacy,
            method: HttpMethod::Post,
            reserved,
            injected: None,
        }
    }

    fn inject(mut self, parameter: Parameter) -> Self {
        self.injected = Some(parameter);
        self
    }
}

/// Client for the Graph API and the legacy REST API.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// callers.
pub struct FacebookClient<W = ReqwestWebRequestor, M = SerdeJsonMapper> {
    access_token: String,
    router: EndpointRouter,
    requestor: W,
    mapper: M,
}

impl FacebookClient {
    /// Create a client using the bundled `reqwest` transport and `serde_json` mapper.
    pub fn new(config: &FacebookConfig) -> FacebookResult<Self> {
        let requestor = ReqwestWebRequestor::new(config)?;
        Self::with_components(config, requestor, SerdeJsonMapper)
    }
}

impl<W: WebRequestor, M: JsonMapper> FacebookClient<W, M> {
    /// Create a client from explicit transport and mapper collaborators.
    pub fn with_components(config: &FacebookConfig, requestor: W, mapper: M) -> FacebookResult<Self> {
        config.validate()?;
        Ok(Self {
            access_token: config.access_token.clone(),
            router: EndpointRouter::from_config(config),
            requestor,
            mapper,
        })
    }

    /// Fetch a single Graph API object, e.g. `"me"` or `"cocacola"`.
    #[instrument(skip(self, parameters))]
    pub async fn fetch_object<T: DeserializeOwned>(
        &self,
        object: &str,
        parameters: &[Parameter],
    ) -> FacebookResult<T> {
        require_present("object", object)?;
        let body = self
            .make_request(ApiCall::graph_get(object, RESERVED_PARAM_NAMES), parameters)
            .await?;
        self.mapper.to_object(&body)
    }

    /// Fetch several objects in one request via the `ids` parameter.
    ///
    /// IDs are trimmed and lower-cased. Objects the API does not return are
    /// left out, so the result may be shorter than `ids`.
    #[instrument(skip(self, ids, parameters), fields(count = ids.len()))]
    pub async fn fetch_objects<T: DeserializeOwned, S: AsRef<str>>(
        &self,
        ids: &[S],
        parameters: &[Parameter],
    ) -> FacebookResult<Vec<T>> {
        let ids = normalize_ids(ids)?;
        let call = ApiCall::graph_get("", FETCH_OBJECTS_RESERVED_PARAM_NAMES)
            .inject(Parameter::with(IDS_PARAM_NAME, ids.join(",")));
        let body = self.make_request(call, parameters).await?;

        read_batch(&body, &ids)?
            .iter()
            .map(|raw| self.mapper.to_object(raw))
            .collect()
    }

    /// Fetch one page of a connection, e.g. `"me/friends"`.
    #[instrument(skip(self, parameters))]
    pub async fn fetch_connection<T: DeserializeOwned>(
        &self,
        connection: &str,
        parameters: &[Parameter],
    ) -> FacebookResult<Connection<T>> {
        require_present("connection", connection)?;
        let body = self
            .make_request(
                ApiCall::graph_get(connection, RESERVED_PARAM_NAMES),
                parameters,
            )
            .await?;

        read_page(&body)?.try_map(|raw| self.mapper.to_object(&raw))
    }

    /// Run an FQL query against the legacy API, decoding each result row.
    #[instrument(skip(self, parameters))]
    pub async fn execute_query<T: DeserializeOwned>(
        &self,
        query: &str,
        parameters: &[Parameter],
    ) -> FacebookResult<Vec<T>> {
        require_present("query", query)?;
        let call = ApiCall::legacy_post(FQL_QUERY_METHOD, QUERY_RESERVED_PARAM_NAMES)
            .inject(Parameter::with(QUERY_PARAM_NAME, query));
        let body = self.make_request(call, parameters).await?;
        self.mapper.to_list(&body)
    }

    /// Run several named FQL queries in one request.
    ///
    /// The result sets are re-keyed by query name and decoded into a single
    /// `T` whose fields mirror those names.
    #[instrument(skip(self, queries, parameters), fields(count = queries.len()))]
    pub async fn execute_multiquery<T: DeserializeOwned>(
        &self,
        queries: &QueryMap,
        parameters: &[Parameter],
    ) -> FacebookResult<T> {
        let payload = build_payload(queries)?;
        let call = ApiCall::legacy_post(FQL_MULTIQUERY_METHOD, MULTIQUERY_RESERVED_PARAM_NAMES)
            .inject(Parameter::with(QUERIES_PARAM_NAME, payload));
        let body = self.make_request(call, parameters).await?;
        self.mapper.to_object(&normalize_results(&body)?)
    }

    /// Publish to a connection. Not supported yet.
    pub async fn publish(&self, _connection: &str, _parameters: &[Parameter]) -> FacebookResult<()> {
        Err(FacebookError::NotImplemented("publish"))
    }

    /// Delete an object. Not supported yet.
    pub async fn delete_object(&self, _object: &str) -> FacebookResult<()> {
        Err(FacebookError::NotImplemented("delete_object"))
    }

    async fn make_request(
        &self,
        call: ApiCall<'_>,
        parameters: &[Parameter],
    ) -> FacebookResult<String> {
        let mut parameter_set = ParameterSet::from(parameters);
        parameter_set.validate(call.reserved)?;

        if let Some(parameter) = call.injected {
            parameter_set = parameter_set.with_internal(parameter);
        }
        let parameter_set = parameter_set.with_internal(Parameter::with(FORMAT_PARAM_NAME, "json"));

        let request = self
            .router
            .route(call.path, call.endpoint, call.method)
            .prepare(&parameter_set.encode(&self.access_token));

        debug!(
            method = %call.method,
            endpoint = ?call.endpoint,
            path = call.path,
            "Making Facebook API request"
        );

        let response = match request {
            PreparedRequest::Get { url } => self.requestor.execute_get(&url).await?,
            PreparedRequest::Post { url, body } => self.requestor.execute_post(&url, &body).await?,
        };

        info!(
            status = response.status_code,
            bytes = response.body.len(),
            "Facebook responded"
        );

        classify(response)
    }
}

impl<W, M> fmt::Debug for FacebookClient<W, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacebookClient")
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

fn require_present(name: &str, value: &str) -> FacebookResult<()> {
    if value.trim().is_empty() {
        return Err(FacebookError::invalid(format!(
            "The '{name}' parameter cannot be an empty string."
        )));
    }
    Ok(())
}
