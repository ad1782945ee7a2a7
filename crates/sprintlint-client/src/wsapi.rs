//! Blocking HTTP implementation of [`TrackerClient`] for the tracking
//! service's web-service API.
//!
//! One GET per fetch against `{server}/slm/webservice/v2.0/{kind}.js`, with
//! the rendered predicate in the `query` parameter. The response envelope
//! is `{"QueryResult": {"Errors": [...], "Warnings": [...], "Results":
//! [...]}}`; backend errors are passed through verbatim for the fetch
//! wrapper to act on.

use serde::Deserialize;
use url::Url;

use crate::client::{FetchResponse, TrackerClient, TransportError};
use crate::entity::Entity;

const WSAPI_VERSION: &str = "v2.0";
const DEFAULT_PAGESIZE: u32 = 200;

#[derive(Debug, Clone)]
pub struct WsapiConfig {
    /// Service base URL, e.g. `https://rally1.rallydev.com`.
    pub server: String,
    /// Basic-auth credentials; ignored when `api_key` is set.
    pub username: Option<String>,
    pub password: Option<String>,
    /// API key sent as the `zsessionid` header.
    pub api_key: Option<String>,
    /// Project to scope queries to; the backend default when absent.
    pub project: Option<String>,
    pub pagesize: u32,
}

impl WsapiConfig {
    pub fn new(server: impl Into<String>) -> Self {
        WsapiConfig {
            server: server.into(),
            username: None,
            password: None,
            api_key: None,
            project: None,
            pagesize: DEFAULT_PAGESIZE,
        }
    }
}

pub struct WsapiClient {
    http: reqwest::blocking::Client,
    config: WsapiConfig,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "QueryResult")]
    query_result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(rename = "Errors", default)]
    errors: Vec<String>,
    #[serde(rename = "Warnings", default)]
    warnings: Vec<String>,
    #[serde(rename = "Results", default)]
    results: Vec<serde_json::Value>,
}

impl WsapiClient {
    pub fn new(config: WsapiConfig) -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("sprintlint/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(WsapiClient { http, config })
    }

    fn endpoint(&self, entity_kind: &str) -> Result<Url, TransportError> {
        let base = Url::parse(&self.config.server)?;
        let url = base.join(&format!("slm/webservice/{WSAPI_VERSION}/{entity_kind}.js"))?;
        Ok(url)
    }
}

impl TrackerClient for WsapiClient {
    fn fetch(
        &self,
        entity_kind: &str,
        query: Option<&str>,
        scope_down: bool,
    ) -> Result<FetchResponse, TransportError> {
        let mut url = self.endpoint(entity_kind)?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("fetch", "true");
            params.append_pair("pagesize", &self.config.pagesize.to_string());
            params.append_pair("projectScopeDown", if scope_down { "true" } else { "false" });
            if let Some(q) = query {
                params.append_pair("query", q);
            }
            if let Some(project) = &self.config.project {
                params.append_pair("project", project);
            }
        }

        let mut request = self.http.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.header("zsessionid", key);
        } else if let Some(user) = &self.config.username {
            request = request.basic_auth(user, self.config.password.as_deref());
        }

        let envelope: Envelope = request.send()?.error_for_status()?.json()?;
        let result = envelope.query_result.ok_or_else(|| {
            TransportError::Decode("response envelope has no QueryResult".to_string())
        })?;

        Ok(FetchResponse {
            errors: result.errors,
            warnings: result.warnings,
            items: result.results.into_iter().map(Entity::new).collect(),
        })
    }
}
