//! The fetch choke point.
//!
//! [`Tracker::get`] is the one path every check fetches entities through:
//! scope filters are injected here, so no check can accidentally bypass
//! them. A fetch either fully succeeds or fails outright; there is no
//! partial-result mode.

use sprintlint_query::{InvalidTermFormat, QueryExpression};
use tracing::{debug, warn};

use crate::attributes::AttributeMap;
use crate::client::{TrackerClient, TransportError};
use crate::entity::Entity;
use crate::inject::inject_filters;
use crate::scope::ScopeOptions;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A check supplied a malformed raw term. Programming error; never
    /// retried.
    #[error(transparent)]
    InvalidTerm(#[from] InvalidTermFormat),
    /// The backend reported errors for the request. Not retried: a query
    /// the backend rejects will not succeed on a second attempt.
    #[error("backend rejected fetch of {entity_kind:?} (query: {query:?}): {errors:?}")]
    RemoteQuery {
        entity_kind: String,
        query: Option<String>,
        errors: Vec<String>,
    },
    /// The round-trip itself failed (network, decode).
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The fetch wrapper: holds the transport client plus the run-wide scope
/// options and attribute map, both read-only for the duration of the run.
pub struct Tracker<C> {
    client: C,
    scope: ScopeOptions,
    attrs: AttributeMap,
}

impl<C: TrackerClient> Tracker<C> {
    pub fn new(client: C, scope: ScopeOptions) -> Self {
        Tracker {
            client,
            scope,
            attrs: AttributeMap::standard(),
        }
    }

    pub fn scope(&self) -> &ScopeOptions {
        &self.scope
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch all entities of `entity_kind` matching `query` plus the
    /// run-wide scope filters, in backend order. When neither the caller
    /// nor the scope contributes a predicate, the query argument is
    /// omitted from the request entirely.
    pub fn get(
        &self,
        entity_kind: &str,
        query: Option<QueryExpression>,
    ) -> Result<Vec<Entity>, FetchError> {
        let final_query = inject_filters(entity_kind, query, &self.scope, &self.attrs)?;
        let rendered: Option<String> = final_query
            .as_ref()
            .and_then(QueryExpression::render)
            .map(str::to_string);
        debug!(entity_kind, query = rendered.as_deref(), "fetch");

        let response = self
            .client
            .fetch(entity_kind, rendered.as_deref(), true)?;

        for warning in &response.warnings {
            warn!(entity_kind, warning = warning.as_str(), "backend warning");
        }
        if !response.errors.is_empty() {
            return Err(FetchError::RemoteQuery {
                entity_kind: entity_kind.to_string(),
                query: rendered,
                errors: response.errors,
            });
        }
        Ok(response.items)
    }
}
