//! The transport seam.
//!
//! [`TrackerClient`] is the only boundary between this crate and the wire:
//! one method that executes a rendered query string against the remote
//! service and reports whatever the backend said, errors included. The
//! production implementation is [`crate::WsapiClient`]; tests substitute
//! in-memory fakes.

use thiserror::Error;

use crate::entity::Entity;

/// What the backend returned for one request. A non-empty `errors` list
/// means the request failed regardless of how many `items` came back.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub items: Vec<Entity>,
}

/// Failure to complete the round-trip at all (as opposed to a completed
/// round-trip whose response carries backend errors).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid service url: {0}")]
    Url(#[from] url::ParseError),
    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// Executes one query against the remote tracking service.
///
/// `query` is the rendered predicate string, or `None` for an unfiltered
/// fetch. `scope_down` asks the backend to include child projects.
pub trait TrackerClient {
    fn fetch(
        &self,
        entity_kind: &str,
        query: Option<&str>,
        scope_down: bool,
    ) -> Result<FetchResponse, TransportError>;
}

impl<T: TrackerClient + ?Sized> TrackerClient for Box<T> {
    fn fetch(
        &self,
        entity_kind: &str,
        query: Option<&str>,
        scope_down: bool,
    ) -> Result<FetchResponse, TransportError> {
        (**self).fetch(entity_kind, query, scope_down)
    }
}
